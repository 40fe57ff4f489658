//! OpenAPI documentation assembly.

use utoipa::OpenApi;

/// Aggregated API documentation, served at `/docs`.
///
/// Paths are declared relative to the `/api/v1` prefix they are nested
/// under; schemas referenced by the handlers are collected automatically.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SamboKid API",
        description = "Sports school management: groups, students, attendance with automatic \
                       balance deduction, and the payment ledger."
    ),
    paths(
        crate::api::handlers::groups::list_groups,
        crate::api::handlers::groups::create_group,
        crate::api::handlers::students::list_students,
        crate::api::handlers::students::create_student,
        crate::api::handlers::attendance::record_attendance,
        crate::api::handlers::attendance::list_attendance,
        crate::api::handlers::transactions::create_transaction,
        crate::api::handlers::transactions::list_transactions,
    ),
    tags(
        (name = "groups", description = "Training group management"),
        (name = "students", description = "Student onboarding and rosters"),
        (name = "attendance", description = "Session attendance and automatic charging"),
        (name = "transactions", description = "Payments and ledger history"),
    )
)]
pub struct ApiDoc;
