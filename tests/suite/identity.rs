//! Runtime identity: only genuine instances pass the family checks.

use keel::{Family, Tagged, is_option, is_result, none, ok, some};

/// Same shape as an Ok, built by hand.
struct Counterfeit {
    tag: &'static str,
    #[allow(dead_code)]
    value: i32,
}

impl Tagged for Counterfeit {
    fn tag_name(&self) -> &str {
        self.tag
    }
}

#[test]
fn counterfeit_fails_identity_check() {
    let fake = Counterfeit { tag: "Ok", value: 1 };
    assert_eq!(fake.tag_name(), "Ok");
    assert!(!is_result(&fake));
    assert!(!is_option(&fake));
}

#[test]
fn genuine_instances_pass_their_own_family_only() {
    let r = ok::<i32, ()>(1);
    assert!(is_result(&r));
    assert!(!is_option(&r));

    let o = some(1);
    assert!(is_option(&o));
    assert!(!is_result(&o));
    assert!(is_option(&none::<()>()));

    assert_eq!(keel::family_of(&r), Some(Family::Result));
    assert_eq!(keel::family_of(&o), Some(Family::Option));
}
