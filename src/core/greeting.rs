use crate::{core::platform::Responder, errors::PlatformError};

/// Reply text of the `hello_world` command.
pub const GREETING: &str = "こんにちは";

/// Sends the greeting as the single primary reply.
pub async fn run<R: Responder>(responder: &R) -> Result<(), PlatformError> {
    responder.reply(GREETING.to_string()).await
}
