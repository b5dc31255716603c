//! Property tests over the domain primitives

use proptest::prelude::*;

use lifelink::models::blood::{BloodType, Priority};
use lifelink::models::donation::DonationStatus;
use lifelink::models::request::RequestStatus;
use lifelink::services::donation::wait_days_remaining;

proptest! {
    #[test]
    fn blood_type_parsing_never_panics(s in ".{0,16}") {
        let _ = s.parse::<BloodType>();
    }

    #[test]
    fn blood_type_parse_accepts_any_casing(index in 0usize..8) {
        let canonical = BloodType::ALL[index].as_str();
        prop_assert_eq!(
            canonical.to_lowercase().parse::<BloodType>().unwrap(),
            BloodType::ALL[index]
        );
    }

    #[test]
    fn priority_parsing_never_panics(s in ".{0,16}") {
        let _ = s.parse::<Priority>();
    }

    #[test]
    fn status_parsing_never_panics(s in ".{0,16}") {
        let _ = s.parse::<RequestStatus>();
        let _ = s.parse::<DonationStatus>();
    }

    #[test]
    fn eligibility_wait_is_bounded(elapsed in 0i64..500, interval in 1i64..365) {
        let now = chrono::Utc::now();
        let last = now - chrono::Duration::days(elapsed);

        match wait_days_remaining(Some(last), now, interval) {
            None => prop_assert!(elapsed >= interval),
            Some(days) => {
                prop_assert!(elapsed < interval);
                prop_assert!(days >= 1);
                prop_assert!(days <= interval);
            }
        }
    }

    #[test]
    fn request_transitions_leave_terminal_states_closed(
        from in prop::sample::select(vec!["PENDING", "ACCEPTED", "REJECTED", "FULFILLED", "CANCELLED"]),
        to in prop::sample::select(vec!["PENDING", "ACCEPTED", "REJECTED", "FULFILLED", "CANCELLED"]),
    ) {
        let from: RequestStatus = from.parse().unwrap();
        let to: RequestStatus = to.parse().unwrap();

        if matches!(from, RequestStatus::Rejected | RequestStatus::Fulfilled | RequestStatus::Cancelled) {
            prop_assert!(!from.can_transition_to(to));
        }
    }
}
