use chrono::{Duration, Utc};
use posdash_auth::{
    AuthStore, InMemoryAuthStore, Role, RoleSet, SessionClaims, SessionState, TosStatus,
    UserProfile,
};
use posdash_core::{RouteName, UserId};
use posdash_router::{
    GuardRule, NavigationGuard, Navigator, Outcome, RouteTable, dashboard_table,
};

fn table() -> RouteTable {
    dashboard_table().expect("dashboard routes are valid")
}

fn evaluate(table: &RouteTable, path: &str, session: &SessionState) -> Outcome {
    let matched = table.resolve(path).expect("path resolves");
    NavigationGuard::new()
        .evaluate(matched.route, None, session)
        .outcome
}

fn signed_in(roles: RoleSet, tos: TosStatus) -> SessionState {
    SessionState::authenticated(roles, tos)
}

#[test]
fn scenario_signed_out_user_opening_pos_overview_goes_to_login() {
    let outcome = evaluate(&table(), "/point-of-sale/overview", &SessionState::anonymous());
    assert_eq!(outcome, Outcome::Redirect(RouteName::LOGIN));
}

#[test]
fn scenario_unaccepted_terms_send_home_visit_to_tos() {
    let session = signed_in(RoleSet::empty(), TosStatus::NotAccepted);
    let outcome = evaluate(&table(), "/", &session);
    assert_eq!(outcome, Outcome::Redirect(RouteName::TOS));
}

#[test]
fn scenario_seller_may_request_a_point_of_sale() {
    let session = signed_in(RoleSet::empty().with(Role::Seller), TosStatus::Accepted);
    let outcome = evaluate(&table(), "/point-of-sale/request", &session);
    assert_eq!(outcome, Outcome::Proceed);
}

#[test]
fn scenario_user_without_roles_is_kept_out_of_user_overview() {
    let session = signed_in(RoleSet::empty(), TosStatus::Accepted);
    let outcome = evaluate(&table(), "/user-overview", &session);
    assert_eq!(outcome, Outcome::Redirect(RouteName::HOME));
}

#[test]
fn scenario_onboarded_user_visiting_login_goes_home() {
    let session = signed_in(RoleSet::empty(), TosStatus::Accepted);
    let outcome = evaluate(&table(), "/login", &session);
    assert_eq!(outcome, Outcome::Redirect(RouteName::HOME));
}

#[test]
fn every_protected_route_sends_signed_out_users_to_login() {
    let table = table();
    let guard = NavigationGuard::new();
    for route in table.routes().filter(|r| r.meta.requires_auth) {
        let d = guard.evaluate(route, None, &SessionState::anonymous());
        assert_eq!(d.outcome, Outcome::Redirect(RouteName::LOGIN), "{}", route.name);
    }
}

#[test]
fn every_public_route_sends_onboarded_users_home() {
    let table = table();
    let guard = NavigationGuard::new();
    let session = signed_in(RoleSet::empty().with(Role::Board), TosStatus::Accepted);
    for route in table.routes().filter(|r| !r.meta.requires_auth) {
        let d = guard.evaluate(route, None, &session);
        assert_eq!(d.outcome, Outcome::Redirect(RouteName::HOME), "{}", route.name);
        assert_eq!(d.rule, GuardRule::PublicOnly);
    }
}

#[test]
fn board_and_bac_member_reaches_every_dashboard_page() {
    let table = table();
    let mut nav = Navigator::new(table.clone());
    let everything = RoleSet::empty()
        .with(Role::Board)
        .with(Role::Bac)
        .with(Role::Seller);
    let session = signed_in(everything, TosStatus::Accepted);

    for route in table.routes().filter(|r| r.meta.requires_auth) {
        let n = nav.navigate_to(&route.name, &session).unwrap();
        assert_eq!(n.route, route.name);
        assert!(!n.was_redirected());
    }
}

#[test]
fn store_driven_onboarding_flow() {
    let table = table();
    let mut nav = Navigator::new(table);
    let store = InMemoryAuthStore::new();

    // Signed out: everything protected ends on the login page.
    let n = nav.navigate_with_store("/banners", &store).unwrap();
    assert_eq!(n.route, RouteName::LOGIN);

    let user = UserId::new();
    let now = Utc::now();
    store
        .login(
            SessionClaims {
                sub: user,
                roles: vec!["Board".to_string()],
                issued_at: now - Duration::minutes(1),
                expires_at: now + Duration::hours(8),
            },
            UserProfile {
                id: user,
                accepted_tos: Some("NOT_ACCEPTED".to_string()),
            },
        )
        .unwrap();

    // Terms first, wherever the user tries to go.
    let n = nav.navigate_with_store("/banners", &store).unwrap();
    assert_eq!(n.route, RouteName::TOS);
    assert_eq!(n.redirects.len(), 1);
    assert_eq!(n.redirects[0].rule, GuardRule::RequiresTosAcceptance);

    store.accept_tos().unwrap();
    assert_eq!(store.snapshot().tos, TosStatus::Accepted);

    let n = nav.navigate_with_store("/banners", &store).unwrap();
    assert_eq!(n.route, RouteName::new("banners"));

    // Board alone is not enough for the user overview.
    let n = nav.navigate_with_store("/user-overview", &store).unwrap();
    assert_eq!(n.route, RouteName::HOME);

    // Back on the login page after signing in: bounced home.
    let n = nav.navigate_with_store("/login", &store).unwrap();
    assert_eq!(n.route, RouteName::HOME);

    store.logout().unwrap();
    let n = nav.navigate_with_store("/profile", &store).unwrap();
    assert_eq!(n.route, RouteName::LOGIN);
}
