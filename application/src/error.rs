//! Errors reported to GraphQL clients of the hotel API.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use service::infra::database;
use tracerr::{Trace, Traced};

/// Defines an enum of client-facing errors, each with its own `code`, HTTP
/// `status` and `message`, convertible into an [`Error`].
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Client-facing error.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

define_error! {
    enum GuestError {
        #[code = "GUEST_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Guest` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum RoomError {
        #[code = "ROOM_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Room` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum RoomTypeError {
        #[code = "ROOM_TYPE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`RoomType` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ReservationError {
        #[code = "RESERVATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Reservation` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum DateRangeError {
        #[code = "INVALID_DATE_RANGE"]
        #[status = BAD_REQUEST]
        #[message = "`checkOut` must be after `checkIn`"]
        Invalid,
    }
}

define_error! {
    enum DatabaseError {
        #[code = "DATABASE_UNAVAILABLE"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Reservations storage is unavailable, retry later"]
        Unavailable,
    }
}

/// Error of the hotel GraphQL API, rendered into the `errors` of a response.
///
/// The `code` goes to the `extensions` of a GraphQL error, while the
/// `status_code` becomes the HTTP status of the whole response.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// Machine-readable code, like `ROOM_UNAVAILABLE`.
    pub code: Code,

    /// HTTP status of the response carrying this [`Error`].
    pub status_code: http::StatusCode,

    /// Where the [`Error`] has happened inside the service.
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// Human-readable message.
    pub message: String,
}

impl Error {
    /// Creates an `INTERNAL_SERVER_ERROR` one, for failures a client can't
    /// act upon.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)?;
        for frame in self.backtrace.iter().flat_map(|t| t.iter()) {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let frames = self
            .backtrace
            .iter()
            .flat_map(|trace| trace.iter())
            .map(|frame| juniper::Value::scalar(frame.to_string()))
            .collect_vec();

        let mut ext = juniper::Object::with_capacity(2);
        drop(ext.add_field("code", juniper::Value::scalar(self.code.to_owned())));
        drop(ext.add_field("backtrace", juniper::Value::list(frames)));
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// Machine-readable code of an [`Error`].
pub type Code = &'static str;

/// Conversion of a service error into an [`Error`] for clients.
pub trait AsError {
    /// Converts this error into an [`Error`], if clients may act upon it.
    ///
    /// [`None`] means an internal failure.
    fn try_as_error(&self) -> Option<Error>;

    /// Converts this error into an [`Error`], falling back to
    /// [`Error::internal()`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Same as [`AsError::as_error()`], but consumes this error.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        self.is_unavailable()
            .then(|| DatabaseError::Unavailable.into())
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, IntoFieldError as _};

    use super::{AsError as _, DateRangeError, Error, RoomError};

    #[test]
    fn carries_code_and_status() {
        let err = Error::from(RoomError::NotExists);
        assert_eq!(err.code, "ROOM_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "[ROOM_NOT_EXISTS]: `Room` with the specified ID does not exist",
        );

        let err = Error::from(DateRangeError::Invalid);
        assert_eq!(err.code, "INVALID_DATE_RANGE");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn exposes_code_in_extensions() {
        let err: juniper::FieldError<DefaultScalarValue> =
            Error::from(RoomError::NotExists).into_field_error();

        assert_eq!(
            err.message(),
            "`Room` with the specified ID does not exist",
        );
        let code = err
            .extensions()
            .as_object_value()
            .and_then(|ext| ext.get_field_value("code"))
            .and_then(|code| code.as_string_value());
        assert_eq!(code, Some("ROOM_NOT_EXISTS"));
    }

    #[test]
    fn hides_unknown_failures() {
        #[derive(derive_more::Display)]
        #[display("disk is on fire")]
        struct Failure;

        impl super::AsError for Failure {
            fn try_as_error(&self) -> Option<Error> {
                None
            }
        }

        let err = Failure.into_error();
        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "disk is on fire");
    }
}
