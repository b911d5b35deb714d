use axum::extract::DefaultBodyLimit;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin_user::{self, ADMIN_USER_TAG},
        auth::{self, AUTH_TAG},
        company::{self, COMPANY_TAG},
        driver::{self, DRIVER_TAG},
        driver_portal::{self, DRIVER_PORTAL_TAG},
        integration::{self, INTEGRATION_TAG},
        matching::{self, MATCH_TAG},
        notification::{self, NOTIFICATION_TAG},
        payment::{self, PAYMENT_TAG},
        request::{self, REQUEST_TAG},
        role::{self, ROLE_TAG},
        setup::{self, SETUP_TAG},
        stats::{self, STATS_TAG},
    },
    state::AppState,
    util::upload::MAX_UPLOAD_BYTES,
};

/// Three documents plus multipart framing.
const KYC_UPLOAD_BODY_LIMIT: usize = 3 * MAX_UPLOAD_BYTES + 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "FleetBroker API", description = "Driver brokerage back office"),
    tags(
        (name = SETUP_TAG, description = "First Super Admin bootstrap"),
        (name = AUTH_TAG, description = "Admin authentication"),
        (name = ROLE_TAG, description = "Roles and permissions"),
        (name = ADMIN_USER_TAG, description = "Admin accounts"),
        (name = DRIVER_TAG, description = "Driver management and KYC review"),
        (name = DRIVER_PORTAL_TAG, description = "Driver self-service"),
        (name = COMPANY_TAG, description = "Client companies"),
        (name = REQUEST_TAG, description = "Company driver requests"),
        (name = MATCH_TAG, description = "Driver to request matching"),
        (name = NOTIFICATION_TAG, description = "Notification templates and log"),
        (name = INTEGRATION_TAG, description = "External provider status"),
        (name = PAYMENT_TAG, description = "Payment webhooks and transactions"),
        (name = STATS_TAG, description = "Dashboard and CSV exports")
    )
)]
struct ApiDoc;

pub fn router() -> axum::Router<AppState> {
    let uploads = OpenApiRouter::new()
        .routes(routes!(driver_portal::submit_documents))
        .layer(DefaultBodyLimit::max(KYC_UPLOAD_BODY_LIMIT));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(setup::setup))
        // Admin authentication
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me))
        .routes(routes!(auth::change_password))
        // Roles and admins
        .routes(routes!(role::get_roles, role::create_role))
        .routes(routes!(role::get_role, role::update_role, role::delete_role))
        .routes(routes!(role::get_permissions))
        .routes(routes!(admin_user::get_admins, admin_user::create_admin))
        .routes(routes!(
            admin_user::get_admin,
            admin_user::update_admin,
            admin_user::delete_admin
        ))
        // Drivers
        .routes(routes!(driver::get_drivers, driver::create_driver))
        .routes(routes!(
            driver::get_driver,
            driver::update_driver,
            driver::delete_driver
        ))
        .routes(routes!(driver::bulk_drivers))
        .routes(routes!(driver::approve_driver))
        .routes(routes!(driver::reject_driver))
        // Driver portal
        .routes(routes!(driver_portal::register))
        .routes(routes!(driver_portal::login))
        .routes(routes!(driver_portal::logout))
        .routes(routes!(driver_portal::me))
        .routes(routes!(driver_portal::request_otp))
        .routes(routes!(driver_portal::verify_otp))
        .routes(routes!(driver_portal::kyc_status))
        .routes(routes!(driver_portal::submit_personal_info))
        .routes(routes!(driver_portal::submit_license))
        .routes(routes!(driver_portal::get_matches))
        .routes(routes!(driver_portal::accept_match))
        .routes(routes!(driver_portal::decline_match))
        .merge(uploads)
        // Companies and requests
        .routes(routes!(company::get_companies, company::create_company))
        .routes(routes!(
            company::get_company,
            company::update_company,
            company::delete_company
        ))
        .routes(routes!(company::toggle_company))
        .routes(routes!(request::get_requests, request::create_request))
        .routes(routes!(request::get_request, request::update_request))
        .routes(routes!(request::cancel_request))
        .routes(routes!(request::complete_request))
        // Matching
        .routes(routes!(matching::get_matches, matching::create_match))
        .routes(routes!(matching::auto_match))
        .routes(routes!(matching::cancel_match))
        .routes(routes!(matching::complete_match))
        // Notifications
        .routes(routes!(
            notification::get_templates,
            notification::create_template
        ))
        .routes(routes!(
            notification::get_template,
            notification::update_template,
            notification::delete_template
        ))
        .routes(routes!(notification::preview_template))
        .routes(routes!(notification::get_log))
        // Integrations, payments and reporting
        .routes(routes!(integration::get_integrations))
        .routes(routes!(payment::receive_webhook))
        .routes(routes!(payment::get_payments))
        .routes(routes!(stats::get_stats))
        .routes(routes!(stats::export_drivers))
        .routes(routes!(stats::export_companies))
        .routes(routes!(stats::export_matches))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
