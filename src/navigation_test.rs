use super::*;

#[test]
fn route_paths() {
    assert_eq!(Route::Root.path(), "/");
    assert_eq!(Route::Profile.path(), "/profile");
    assert_eq!(Route::Success.path(), "/success");
}

#[test]
fn route_display_is_path() {
    assert_eq!(Route::Profile.to_string(), "/profile");
}

#[test]
fn history_starts_empty() {
    let history = History::new();
    assert_eq!(history.current(), None);
    assert!(history.visited().is_empty());
}

#[test]
fn history_records_in_order() {
    let history = History::new();
    history.navigate(Route::Profile);
    history.navigate(Route::Root);
    assert_eq!(history.current(), Some(Route::Root));
    assert_eq!(history.visited(), vec![Route::Profile, Route::Root]);
}
