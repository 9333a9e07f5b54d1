pub mod checkout;
pub mod events;
pub mod mock;
pub mod reconciler;
pub mod stripe;

pub use checkout::{CheckoutError, CheckoutService};
pub use events::WebhookEvent;
pub use mock::MockCheckoutProvider;
pub use reconciler::{WebhookError, WebhookReconciler};
pub use stripe::{StripeClient, StripeConfig};
