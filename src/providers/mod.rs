mod traits;
mod zendesk_sell;

pub use traits::{OAuthProvider, TokenPair, TokenRecord};
pub use zendesk_sell::ZendeskSellProvider;
