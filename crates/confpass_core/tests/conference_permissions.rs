use confpass_core::permission::{admin_grants, select_current_conference, ADMIN_PERMISSION_CODES};
use confpass_core::{
    available_conferences, evaluate_requirement, grants_from_value,
    has_all_conference_permission, has_any_conference_permission, has_conference_permission,
    ConferencePermissionGrant, ConferenceRef, GuardDecision, PermissionRequirement,
};
use serde_json::json;

#[test]
fn empty_grants_deny_everything() {
    assert!(!has_conference_permission(&[], 1, 5, "attendees.manage"));
    assert!(!has_any_conference_permission(&[], 1, "attendees.manage"));
    assert!(available_conferences(&[], 1).is_empty());
}

#[test]
fn inactive_grant_is_invisible_to_positive_queries() {
    let grants = vec![ConferencePermissionGrant::new(1, 5)
        .with_permission("attendees.manage", true)
        .with_active(false)];

    assert!(!has_conference_permission(&grants, 1, 5, "attendees.manage"));
    assert!(!has_any_conference_permission(&grants, 1, "attendees.manage"));
    assert!(available_conferences(&grants, 1).is_empty());
}

#[test]
fn cross_conference_query_differs_from_scoped_query() {
    let grants = vec![
        ConferencePermissionGrant::new(1, 1).with_permission("x.y", true),
        ConferencePermissionGrant::new(1, 2).with_permission("x.y", false),
    ];

    assert!(has_any_conference_permission(&grants, 1, "x.y"));
    assert!(!has_conference_permission(&grants, 1, 2, "x.y"));
    assert!(has_all_conference_permission(&grants, 1, "x.y", None));
    assert!(!has_all_conference_permission(&grants, 1, "x.y", Some(2)));
}

#[test]
fn other_users_grants_never_leak() {
    let grants = vec![ConferencePermissionGrant::new(2, 5).with_permission("checkin.manage", true)];
    assert!(!has_conference_permission(&grants, 1, 5, "checkin.manage"));
    assert_eq!(select_current_conference(&grants, 1, Some(5)), None);
}

#[test]
fn assignment_rows_feed_the_resolver() {
    let response = json!([
        { "CONFERENCE_ID": 3, "CONFERENCE_NAME": "RustConf", "IS_ACTIVE": 1,
          "PERMISSIONS": "{\"checkin.manage\":true,\"attendees.manage\":false}" },
        { "conferenceId": 4, "isActive": true, "permissions": { "attendees.view": "true" } },
        { "conferenceId": 5, "permissions": { "checkin.manage": true } },
        { "conferenceName": "no id" }
    ]);

    let grants = grants_from_value(&response, 42);
    assert_eq!(grants.len(), 3);
    assert!(grants.iter().all(|grant| grant.user_id == 42));

    assert!(has_conference_permission(&grants, 42, 3, "checkin.manage"));
    assert!(!has_conference_permission(&grants, 42, 3, "attendees.manage"));
    assert!(has_conference_permission(&grants, 42, 4, "attendees.view"));
    assert!(!has_conference_permission(&grants, 42, 5, "checkin.manage"));

    let visible: Vec<i64> = available_conferences(&grants, 42)
        .into_iter()
        .map(|access| access.conference_id)
        .collect();
    assert_eq!(visible, vec![3, 4]);
    assert_eq!(select_current_conference(&grants, 42, Some(5)), Some(3));
}

#[test]
fn guard_checks_requirements_on_current_conference() {
    let grants = vec![
        ConferencePermissionGrant::new(1, 3)
            .with_permission("attendees.view", true)
            .with_permission("checkin.manage", true),
        ConferencePermissionGrant::new(1, 4).with_permission("attendees.manage", true),
    ];

    let any = PermissionRequirement::any_of(["attendees.manage", "checkin.manage"]);
    assert!(evaluate_requirement(&grants, 1, &any, Some(3)).is_allowed());

    let all = PermissionRequirement::all_of(["attendees.view", "attendees.manage"]);
    match evaluate_requirement(&grants, 1, &all, Some(3)) {
        GuardDecision::Denied { missing, .. } => {
            assert_eq!(missing, vec!["attendees.manage".to_string()]);
        }
        GuardDecision::Allowed => panic!("conference 3 lacks attendees.manage"),
    }

    assert!(evaluate_requirement(&grants, 1, &all, None).is_allowed());
    assert!(!evaluate_requirement(&grants, 1, &all.on_conference(4), Some(3)).is_allowed());
}

#[test]
fn admin_grants_cover_every_admin_code() {
    let mut conference = ConferenceRef::new(Some(9));
    conference.name = Some("Summit".to_string());
    let grants = admin_grants(1, &[conference, ConferenceRef::new(None)]);

    assert_eq!(grants.len(), 1);
    for code in ADMIN_PERMISSION_CODES {
        assert!(has_conference_permission(&grants, 1, 9, code));
    }
}
