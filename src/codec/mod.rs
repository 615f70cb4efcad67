//! Callable wire codec
//!
//! Maps between wire JSON and the callable value model, wraps values in the
//! request/response envelopes and classifies responses the way a client sees them.

pub mod envelope;
pub mod response;
pub mod status;
pub mod value;

pub use envelope::{is_empty_body, ErrorPayload, RequestEnvelope, ResponseEnvelope};
pub use response::{decode_response, CallableError, CallableResult};
pub use status::ErrorCode;
pub use value::{
    decode_slice, decode_value, encode_value, values_equal, DecodeError, Int64Wrapper, Mapping,
    Value, INT64_TYPE_URL,
};
