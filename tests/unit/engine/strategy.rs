use super::*;

#[test]
fn ids_round_trip() {
    for s in Strategy::ALL {
        assert_eq!(Strategy::try_from(s.id()).unwrap(), s);
    }
}

#[test]
fn names_parse_case_insensitively() {
    assert_eq!("sequential".parse::<Strategy>().unwrap(), Strategy::Sequential);
    assert_eq!(
        " Static-Threads ".parse::<Strategy>().unwrap(),
        Strategy::StaticThreads
    );
    assert_eq!("task-pool".parse::<Strategy>().unwrap(), Strategy::TaskPool);
    assert_eq!(Strategy::TaskPool.to_string(), "task-pool");
}

#[test]
fn unknown_selectors_fail() {
    assert!(matches!(
        Strategy::try_from(3),
        Err(EdgeError::UnknownStrategy(s)) if s == "3"
    ));
    assert!(matches!(
        "gpu".parse::<Strategy>(),
        Err(EdgeError::UnknownStrategy(s)) if s == "gpu"
    ));
}
