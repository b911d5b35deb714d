use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        driver::{DriverDto, DriverLoginDto, RegisterDriverDto, RegisteredDriverDto},
        kyc::{KycDocumentsForm, KycLicenseDto, KycPersonalInfoDto, KycStatusDto},
        matching::MatchDto,
        otp::{OtpIssuedDto, OtpVerifiedDto, RequestOtpDto, VerifyOtpDto},
        status::DocumentType,
    },
    server::{
        error::AppError,
        middleware::{auth::DriverGuard, session::DriverSession},
        model::{
            driver::{LicenseParams, PersonalInfoParams},
            driver_match::DriverMatch,
        },
        service::{
            driver_portal::{DriverPortalService, Registration},
            kyc::{KycService, UploadedDocument},
            matching::MatchingService,
            otp::{IssuedOtp, OtpService},
        },
        state::AppState,
    },
};

/// Tag for grouping driver self-service endpoints in OpenAPI documentation
pub static DRIVER_PORTAL_TAG: &str = "driver_portal";

fn issued_dto(issued: IssuedOtp) -> OtpIssuedDto {
    OtpIssuedDto {
        identifier: issued.record.identifier,
        channel: issued.record.channel,
        expires_at: issued.record.expires_at,
    }
}

/// Register as a driver.
///
/// A verification code is sent to the phone number. The driver can log in once the
/// phone is verified.
///
/// # Returns
/// - `201 Created` - Driver registered and code sent
/// - `409 Conflict` - Email or phone already registered
/// - `422 Unprocessable Entity` - Invalid field or password too short
#[utoipa::path(
    post,
    path = "/api/driver/register",
    tag = DRIVER_PORTAL_TAG,
    request_body = RegisterDriverDto,
    responses(
        (status = 201, description = "Driver registered", body = RegisteredDriverDto),
        (status = 409, description = "Email or phone already registered", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDriverDto>,
) -> Result<impl IntoResponse, AppError> {
    let (driver, issued) = DriverPortalService::new(&state.db, &state.notifier)
        .register(Registration {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            password: payload.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredDriverDto {
            driver: driver.into_dto(),
            otp: issued_dto(issued),
        }),
    ))
}

/// Log a driver in with phone and password.
///
/// # Returns
/// - `200 OK` - Logged in
/// - `401 Unauthorized` - Wrong credentials, phone not verified or account suspended
#[utoipa::path(
    post,
    path = "/api/driver/login",
    tag = DRIVER_PORTAL_TAG,
    request_body = DriverLoginDto,
    responses(
        (status = 200, description = "Logged in", body = DriverDto),
        (status = 401, description = "Invalid credentials, phone not verified or account suspended", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<DriverLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverPortalService::new(&state.db, &state.notifier)
        .login(&payload.phone, &payload.password)
        .await?;

    DriverSession::new(&session).set_driver_id(driver.id).await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/driver/logout",
    tag = DRIVER_PORTAL_TAG,
    responses(
        (status = 204, description = "Logged out")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    DriverSession::new(&session).logout().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged in driver.
#[utoipa::path(
    get,
    path = "/api/driver/me",
    tag = DRIVER_PORTAL_TAG,
    responses(
        (status = 200, description = "Current driver", body = DriverDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

/// Send a verification code by SMS or email.
///
/// A logged in driver verifies their own contact. Without a session, `phone` must name a
/// registered driver whose phone is not verified yet.
///
/// # Returns
/// - `200 OK` - Code sent
/// - `401 Unauthorized` - Not logged in and no phone given
/// - `404 Not Found` - No unverified driver with that phone
/// - `429 Too Many Requests` - A code was sent too recently
#[utoipa::path(
    post,
    path = "/api/driver/otp/request",
    tag = DRIVER_PORTAL_TAG,
    request_body = RequestOtpDto,
    responses(
        (status = 200, description = "Code sent", body = OtpIssuedDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No unverified driver with that phone", body = ErrorDto),
        (status = 429, description = "Code requested too recently", body = ErrorDto)
    ),
)]
pub async fn request_otp(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RequestOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    let driver = match DriverSession::new(&session).get_driver_id().await? {
        Some(_) => Some(DriverGuard::new(&state.db, &session).require().await?),
        None => None,
    };

    let issued = DriverPortalService::new(&state.db, &state.notifier)
        .request_otp(driver.as_ref(), payload.channel, payload.purpose, payload.phone)
        .await?;

    Ok((StatusCode::OK, Json(issued_dto(issued))))
}

/// Verify a code sent to a phone or email.
///
/// # Returns
/// - `200 OK` - Contact verified
/// - `400 Bad Request` - Wrong code; the body names the attempts left
/// - `404 Not Found` - No code pending for this identifier
/// - `410 Gone` - Code expired
/// - `429 Too Many Requests` - Too many wrong attempts
#[utoipa::path(
    post,
    path = "/api/driver/otp/verify",
    tag = DRIVER_PORTAL_TAG,
    request_body = VerifyOtpDto,
    responses(
        (status = 200, description = "Contact verified", body = OtpVerifiedDto),
        (status = 400, description = "Wrong code", body = ErrorDto),
        (status = 404, description = "No pending code", body = ErrorDto),
        (status = 410, description = "Code expired", body = ErrorDto),
        (status = 429, description = "Too many attempts", body = ErrorDto)
    ),
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    let record = OtpService::new(&state.db, &state.notifier)
        .verify(&payload.identifier, payload.purpose, &payload.code)
        .await?;

    Ok((
        StatusCode::OK,
        Json(OtpVerifiedDto {
            identifier: record.identifier,
            purpose: record.purpose,
            verified_at: record.verified_at.unwrap_or(record.created_at),
        }),
    ))
}

/// Get the logged in driver's KYC progress.
#[utoipa::path(
    get,
    path = "/api/driver/kyc",
    tag = DRIVER_PORTAL_TAG,
    responses(
        (status = 200, description = "KYC progress", body = KycStatusDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn kyc_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let detail = KycService::new(&state.db, &state.upload_dir, &state.providers)
        .status(driver.id)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_kyc_dto())))
}

/// KYC step 1: personal information.
///
/// # Returns
/// - `200 OK` - Step saved
/// - `409 Conflict` - KYC is under review or already verified
/// - `422 Unprocessable Entity` - Driver under 18 or field missing
#[utoipa::path(
    post,
    path = "/api/driver/kyc/personal-info",
    tag = DRIVER_PORTAL_TAG,
    request_body = KycPersonalInfoDto,
    responses(
        (status = 200, description = "Step saved", body = DriverDto),
        (status = 409, description = "KYC locked", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn submit_personal_info(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<KycPersonalInfoDto>,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let driver = KycService::new(&state.db, &state.upload_dir, &state.providers)
        .submit_personal_info(
            driver.id,
            PersonalInfoParams {
                date_of_birth: payload.date_of_birth,
                address: payload.address,
                city: payload.city,
                national_id_number: payload.national_id_number,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

/// KYC step 2: licence and vehicle.
///
/// # Returns
/// - `200 OK` - Step saved
/// - `409 Conflict` - Step 1 missing, or KYC locked
/// - `422 Unprocessable Entity` - Licence expired or field missing
#[utoipa::path(
    post,
    path = "/api/driver/kyc/license",
    tag = DRIVER_PORTAL_TAG,
    request_body = KycLicenseDto,
    responses(
        (status = 200, description = "Step saved", body = DriverDto),
        (status = 409, description = "Previous step missing or KYC locked", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn submit_license(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<KycLicenseDto>,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let driver = KycService::new(&state.db, &state.upload_dir, &state.providers)
        .submit_license(
            driver.id,
            LicenseParams {
                license_number: payload.license_number,
                license_expiry: payload.license_expiry,
                vehicle_type: payload.vehicle_type,
                vehicle_plate: payload.vehicle_plate,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

/// KYC step 3: document upload.
///
/// Multipart form with one file per field named `national_id`, `drivers_license` and
/// `selfie`. On success the driver's KYC moves to pending review.
///
/// # Returns
/// - `200 OK` - Documents stored and KYC submitted
/// - `400 Bad Request` - Malformed form or unknown field
/// - `409 Conflict` - Step 2 missing, or KYC locked
/// - `422 Unprocessable Entity` - Document missing, too large or of a disallowed type
#[utoipa::path(
    post,
    path = "/api/driver/kyc/documents",
    tag = DRIVER_PORTAL_TAG,
    request_body(content = KycDocumentsForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Documents submitted", body = KycStatusDto),
        (status = 400, description = "Malformed upload", body = ErrorDto),
        (status = 409, description = "Previous step missing or KYC locked", body = ErrorDto),
        (status = 422, description = "Invalid document", body = ErrorDto)
    ),
)]
pub async fn submit_documents(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let mut documents = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let document_type: DocumentType = name
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unexpected upload field '{}'", name)))?;
        let file_name = field.file_name().unwrap_or(&name).to_string();
        let bytes = field.bytes().await?;

        documents.push(UploadedDocument {
            document_type,
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let detail = KycService::new(&state.db, &state.upload_dir, &state.providers)
        .submit_documents(driver.id, documents)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_kyc_dto())))
}

/// List the logged in driver's matches, newest first.
#[utoipa::path(
    get,
    path = "/api/driver/matches",
    tag = DRIVER_PORTAL_TAG,
    responses(
        (status = 200, description = "Driver's matches", body = Vec<MatchDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_matches(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let matches = MatchingService::new(&state.db, &state.notifier)
        .get_for_driver(driver.id)
        .await?
        .into_iter()
        .map(DriverMatch::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(matches)))
}

/// Accept a pending match.
///
/// # Returns
/// - `200 OK` - Match accepted
/// - `404 Not Found` - No such match for this driver
/// - `409 Conflict` - Match is no longer pending
#[utoipa::path(
    post,
    path = "/api/driver/matches/{id}/accept",
    tag = DRIVER_PORTAL_TAG,
    params(("id" = i32, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match accepted", body = MatchDto),
        (status = 404, description = "Match not found", body = ErrorDto),
        (status = 409, description = "Match not pending", body = ErrorDto)
    ),
)]
pub async fn accept_match(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let assignment = MatchingService::new(&state.db, &state.notifier)
        .respond(driver.id, id, true)
        .await?;

    Ok((StatusCode::OK, Json(assignment.into_dto())))
}

/// Decline a pending match. The request reopens for other drivers.
#[utoipa::path(
    post,
    path = "/api/driver/matches/{id}/decline",
    tag = DRIVER_PORTAL_TAG,
    params(("id" = i32, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match declined", body = MatchDto),
        (status = 404, description = "Match not found", body = ErrorDto),
        (status = 409, description = "Match not pending", body = ErrorDto)
    ),
)]
pub async fn decline_match(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let driver = DriverGuard::new(&state.db, &session).require().await?;

    let assignment = MatchingService::new(&state.db, &state.notifier)
        .respond(driver.id, id, false)
        .await?;

    Ok((StatusCode::OK, Json(assignment.into_dto())))
}
