pub mod aggregate;
pub mod format;
pub mod handler;
pub mod identifier;
pub mod response;
pub mod sources;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod view;

pub use aggregate::{aggregate, gather, should_fetch, Aggregate, FetchOutcome};
pub use format::format_amount;
pub use handler::FrameHandler;
pub use identifier::{resolve, AccountIdentifier, IdentifierSource, RequestContext};
pub use response::{assemble, ImageUrlRenderer, OutboundResponse, ScreenRenderer};
pub use sources::{EarningsSource, ProfileSource};
pub use state::CarriedState;
pub use view::{derive_view, Action, ActionKind, FrameLinks, ScoreCard, Screen, ViewState};
