//! Domain layer: wire entities, the patch-operation protocol and error types.
//!
//! # Module Organization
//!
//! - `credentials` - Immutable token/application/version/timeout block
//! - `patch` - Operation/property/value triples shared by every PATCH call
//! - `conversation`, `message`, `announcement`, `notification`, `block` -
//!   Records mirroring the Platform API JSON
//! - `errors` - Validation, transport and protocol error taxonomy
//! - `lenient` - Per-field decoding that defaults null or mistyped values

pub mod announcement;
pub mod block;
pub mod conversation;
pub mod credentials;
pub mod errors;
mod lenient;
pub mod message;
pub mod notification;
pub mod patch;

pub use announcement::{Announcement, AnnouncementRequest};
pub use block::BlockedUser;
pub use conversation::{Conversation, ConversationRef, CreateConversationRequest};
pub use credentials::CredentialContext;
pub use errors::{LayerError, TransportError, ValidationError};
pub use message::{Message, MessagePart, SendMessageRequest, Sender};
pub use notification::{Badge, Notification};
pub use patch::{PatchDocument, PatchOperation, PatchOperationKind};
