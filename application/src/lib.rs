//! Application provides GraphQL API for booking hotel rooms via the
//! [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;

use std::{sync::Arc, time};

use axum::{
    extract::MatchedPath,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Extension, Json, Router,
};
use axum_client_ip::InsecureClientIp;
use derive_more::Debug;
use juniper::{
    http::GraphQLBatchResponse, DefaultScalarValue, EmptySubscription,
    ScalarValue,
};
use juniper_axum::extract::JuniperRequest;
use service::{domain::room, query, Query as _};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracerr::Traced;
// Used in binary.
use futures as _;
use refinery as _;
use tokio as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::Context,
    error::{AsError, Error},
};

/// [`Service`] of the hotel backed by [`Postgres`].
///
/// [`Postgres`]: service::infra::Postgres
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Postgres>;

/// Sizes of the hotel catalog, reported once the server starts.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    /// Number of the room types on offer.
    pub room_types: usize,

    /// Number of the rooms open for booking.
    pub available_rooms: usize,

    /// Number of the rooms taken out of service.
    pub out_of_service_rooms: usize,
}

impl Catalog {
    /// Counts the [`Catalog`] of the provided [`Service`].
    ///
    /// # Errors
    ///
    /// If the database fails to list the catalog.
    pub async fn count(
        service: &Service,
    ) -> Result<Self, Traced<service::infra::database::Error>> {
        let room_types = service
            .execute(query::room_types::All::by(()))
            .await
            .map_err(tracerr::wrap!())?
            .len();
        let available_rooms = service
            .execute(query::rooms::ByStatus::by(room::Status::Available))
            .await
            .map_err(tracerr::wrap!())?
            .len();
        let out_of_service_rooms = service
            .execute(query::rooms::ByStatus::by(room::Status::OutOfService))
            .await
            .map_err(tracerr::wrap!())?
            .len();
        Ok(Self {
            room_types,
            available_rooms,
            out_of_service_rooms,
        })
    }
}

/// Builds the HTTP [`Router`] serving the GraphQL API of the hotel at
/// `/graphql`.
pub fn router(service: Service, cors: CorsLayer) -> Router {
    let schema =
        api::Schema::new(api::Query, api::Mutation, EmptySubscription::new());

    Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(schema)))
        .layer(Extension(service))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|r: &http::Request<_>| {
                    tracing::info_span!(
                        "HTTP request",
                        http.client_ip =
                            InsecureClientIp::from(r.headers(), r.extensions())
                                .map(|ip| ip.0.to_string())
                                .ok(),
                        http.method = r.method().as_str(),
                        http.route = r
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str),
                        http.target = r
                            .uri()
                            .path_and_query()
                            .map(http::uri::PathAndQuery::as_str),
                        http.user_agent = r
                            .headers()
                            .get(http::header::USER_AGENT)
                            .and_then(|h| h.to_str().ok()),
                        http.status_code = tracing::field::Empty,
                    )
                })
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &tracing::Span| {
                        let status = r.status();
                        _ = span.record(
                            "http.status_code",
                            tracing::field::display(status.as_u16()),
                        );
                        let duration = format!("{}ms", dur.as_millis());
                        if status.is_server_error() {
                            tracing::error!(%duration);
                        } else if status.is_client_error() {
                            tracing::warn!(%duration);
                        } else {
                            tracing::info!(%duration);
                        }
                    },
                ),
        )
}

/// GraphQL response with the HTTP status of its first failed field.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// HTTP status used if the response has errors.
    pub status_code: http::StatusCode,

    /// Executed GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let status = if self.response.is_ok() {
            http::StatusCode::OK
        } else {
            self.status_code
        };
        (status, Json(self.response)).into_response()
    }
}

/// Executes a GraphQL request against the hotel [`api::Schema`].
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    JuniperResponse {
        status_code: context.error_status_code(),
        response: gql_request.execute(&*schema, &context).await,
    }
}
