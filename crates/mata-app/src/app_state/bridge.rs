//! Bridge call dispatch from the page to the window controller.

use mata_webview::{BridgeCall, BridgeCommand};

use crate::controller::WindowController;

/// Handle one IPC body posted by the bridge runtime.
///
/// Calls that cannot be parsed at all carry no usable id and are dropped.
/// Anything else settles its Promise, except `close`.
pub(super) fn dispatch_bridge_message(controller: &mut WindowController, body: &str) {
    let call = match BridgeCall::from_json(body) {
        Ok(call) => call,
        Err(e) => {
            tracing::warn!(body_len = body.len(), error = %e, "Bridge call dropped");
            return;
        }
    };

    match BridgeCommand::from_call(&call) {
        Ok(command) => {
            tracing::debug!(id = call.id, name = command.binding(), "Bridge call");
            if execute(controller, command) {
                controller.settle(call.id, None);
            }
        }
        Err(e) => {
            tracing::warn!(id = call.id, name = %call.name, error = %e, "Bridge call rejected");
            controller.settle(call.id, Some(&e.to_string()));
        }
    }
}

/// Run a command. Returns whether the caller's Promise should be settled.
fn execute(controller: &mut WindowController, command: BridgeCommand) -> bool {
    match command {
        BridgeCommand::Close => {
            controller.close();
            return false;
        }
        BridgeCommand::Minimize => controller.minimize(),
        BridgeCommand::Maximize => controller.maximize(),
        BridgeCommand::Restore => controller.restore(),
        BridgeCommand::Center => controller.center(),
        BridgeCommand::SetTitle(title) => controller.retitle(&title),
        BridgeCommand::Resize { width, height } => {
            controller.resize(width, height);
        }
        BridgeCommand::ShowAlert(message) => controller.show_alert(&message),
    }
    true
}
