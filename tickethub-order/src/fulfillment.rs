use rand::distributions::Alphanumeric;
use rand::Rng;
use tickethub_shared::Booking;

const TICKET_PREFIX: &str = "TICKET-";
const TICKET_CODE_LEN: usize = 9;
const BOOKING_ID_LEN: usize = 9;
const BOOKING_ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints booking identifiers and the payloads printed on tickets
#[derive(Debug, Clone, Default)]
pub struct TicketIssuer;

impl TicketIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Short lower-case base-36 token, the shape the web client writes
    pub fn booking_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..BOOKING_ID_LEN)
            .map(|_| BOOKING_ID_CHARSET[rng.gen_range(0..BOOKING_ID_CHARSET.len())] as char)
            .collect()
    }

    /// Upper-case ticket payload, e.g. `TICKET-7GQ2K9XJ4`
    pub fn ticket_code(&self) -> String {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TICKET_CODE_LEN)
            .map(|b| (b as char).to_ascii_uppercase())
            .collect();
        format!("{}{}", TICKET_PREFIX, code)
    }

    pub fn is_ticket_code(code: &str) -> bool {
        code.strip_prefix(TICKET_PREFIX).is_some_and(|rest| {
            rest.len() == TICKET_CODE_LEN
                && rest.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
    }

    /// Content to encode into the scannable code shown on the ticket
    pub fn qr_data(&self, booking: &Booking) -> String {
        booking.qr_code.expose().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ticket_code_format() {
        let issuer = TicketIssuer::new();
        for _ in 0..50 {
            let code = issuer.ticket_code();
            assert!(TicketIssuer::is_ticket_code(&code), "bad code {}", code);
        }
        assert!(!TicketIssuer::is_ticket_code("TICKET-abc"));
        assert!(!TicketIssuer::is_ticket_code("PASS-ABCDEFGHI"));
    }

    #[test]
    fn test_booking_id_format() {
        let issuer = TicketIssuer::new();
        let ids: HashSet<String> = (0..100).map(|_| issuer.booking_id()).collect();
        assert_eq!(ids.len(), 100);
        for id in &ids {
            assert_eq!(id.len(), 9);
            assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_codes_are_fresh() {
        let issuer = TicketIssuer::new();
        let codes: HashSet<String> = (0..100).map(|_| issuer.ticket_code()).collect();
        assert_eq!(codes.len(), 100);
    }

    #[test]
    fn test_qr_data_is_ticket_payload() {
        let issuer = TicketIssuer::new();
        let code = issuer.ticket_code();
        let booking = Booking::confirmed(
            issuer.booking_id(),
            "1".to_string(),
            "s1".to_string(),
            vec![],
            0,
            code.clone(),
        );
        assert_eq!(issuer.qr_data(&booking), code);
    }
}
