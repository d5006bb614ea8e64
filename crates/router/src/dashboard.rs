//! The POS dashboard's route tree.

use posdash_auth::Role;
use posdash_core::ConfigResult;

use crate::{RouteNode, RouteTable};

/// Route tree of the dashboard: a public shell (login pages, error page) and
/// an authenticated shell (terms of service and every dashboard page).
pub fn dashboard_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::layout("", "PublicLayout")
            .requires_auth(false)
            .children([
                RouteNode::layout("", "LoginLayout").children([
                    RouteNode::page("login", "/login", "LoginView"),
                    RouteNode::page("local", "/local", "LocalLoginView"),
                    RouteNode::page("passwordreset", "/passwordreset", "PasswordResetView"),
                ]),
                RouteNode::page("error", "/error", "ErrorView"),
            ]),
        RouteNode::layout("", "PublicLayout")
            .requires_auth(true)
            .child(RouteNode::page("tos", "/tos", "TermsOfServiceView")),
        RouteNode::layout("", "DashboardLayout")
            .requires_auth(true)
            .children([
                RouteNode::page("home", "/", "HomeView"),
                RouteNode::page("pointOfSale", "/point-of-sale/overview", "POSOverviewView")
                    .role(Role::Seller),
                RouteNode::page("pointOfSaleInfo", "/point-of-sale/info/:id", "POSInfoView")
                    .role(Role::Seller),
                RouteNode::page("pointOfSaleCreate", "/point-of-sale/request", "POSCreateView")
                    .role(Role::Seller),
                RouteNode::page("pointOfSaleEdit", "/point-of-sale/edit/:id", "POSEditView")
                    .role(Role::Seller),
                RouteNode::page("userOverview", "/user-overview", "UserOverView")
                    .role(Role::Bac)
                    .role(Role::Board),
                RouteNode::page("user", "/user/:userId", "SingleUserView"),
                RouteNode::page(
                    "products-containers-overview",
                    "/manage-products",
                    "ProductsContainersView",
                )
                .role(Role::Bac),
                RouteNode::page("transaction-view", "/transactions", "TransactionsView"),
                RouteNode::page("profile", "/profile", "ProfileView"),
                RouteNode::page("fine", "/fine", "FineView").role(Role::Bac),
                RouteNode::page("banners", "/banners", "BannersView").role(Role::Board),
            ]),
    ]
}

/// Build and validate the dashboard's route table.
pub fn dashboard_table() -> ConfigResult<RouteTable> {
    RouteTable::build(&dashboard_routes())
}
