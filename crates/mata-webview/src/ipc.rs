//! Script bridge between hosted content and the shell.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: each bound global (`mata_win_close`, ...) posts
//!   `{"id": n, "name": "<binding>", "args": [...]}` through
//!   `window.ipc.postMessage` and returns a Promise.
//! - **Rust -> JS**: once the call is handled, Rust evaluates
//!   `window.__mata_bridge.settle(id, error)`, resolving the Promise when
//!   `error` is `null` and rejecting it otherwise.
//!
//! The set of bindings is fixed. Calls are parsed into [`BridgeCommand`],
//! one variant per binding, with argument shapes checked up front.

use mata_common::errors::BridgeError;
use serde::Deserialize;
use serde_json::Value;

pub const CLOSE: &str = "mata_win_close";
pub const MINIMIZE: &str = "mata_win_minimize";
pub const MAXIMIZE: &str = "mata_win_maximize";
pub const RESTORE: &str = "mata_win_restore";
pub const CENTER: &str = "mata_win_center";
pub const TITLE: &str = "mata_win_title";
pub const RESIZE: &str = "mata_win_resize";
pub const ALERT: &str = "mata_alert";

/// A bound global and the `window.mata` member that forwards to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub name: &'static str,
    pub member: &'static str,
}

pub const BINDINGS: &[Binding] = &[
    Binding { name: CLOSE, member: "win.close" },
    Binding { name: MINIMIZE, member: "win.minimize" },
    Binding { name: MAXIMIZE, member: "win.maximize" },
    Binding { name: RESTORE, member: "win.restore" },
    Binding { name: CENTER, member: "win.center" },
    Binding { name: TITLE, member: "win.title" },
    Binding { name: RESIZE, member: "win.resize" },
    Binding { name: ALERT, member: "alert" },
];

/// A raw invocation as posted by the script side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BridgeCall {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl BridgeCall {
    /// Parse a call from the IPC message body.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::Malformed(e.to_string()))
    }
}

/// Window operations reachable from hosted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    Close,
    Minimize,
    Maximize,
    Restore,
    Center,
    SetTitle(String),
    Resize { width: i32, height: i32 },
    ShowAlert(String),
}

impl BridgeCommand {
    /// Marshal a call into a command, checking arity and argument types.
    pub fn from_call(call: &BridgeCall) -> Result<Self, BridgeError> {
        let args = call.args.as_slice();
        match call.name.as_str() {
            CLOSE => expect_arity(CLOSE, args, 0).map(|_| Self::Close),
            MINIMIZE => expect_arity(MINIMIZE, args, 0).map(|_| Self::Minimize),
            MAXIMIZE => expect_arity(MAXIMIZE, args, 0).map(|_| Self::Maximize),
            RESTORE => expect_arity(RESTORE, args, 0).map(|_| Self::Restore),
            CENTER => expect_arity(CENTER, args, 0).map(|_| Self::Center),
            TITLE => {
                expect_arity(TITLE, args, 1)?;
                Ok(Self::SetTitle(string_arg(TITLE, args, 0)?))
            }
            RESIZE => {
                expect_arity(RESIZE, args, 2)?;
                Ok(Self::Resize {
                    width: int_arg(RESIZE, args, 0)?,
                    height: int_arg(RESIZE, args, 1)?,
                })
            }
            ALERT => {
                expect_arity(ALERT, args, 1)?;
                Ok(Self::ShowAlert(string_arg(ALERT, args, 0)?))
            }
            other => Err(BridgeError::UnknownFunction(other.to_string())),
        }
    }

    /// The bound global this command is invoked through.
    pub fn binding(&self) -> &'static str {
        match self {
            Self::Close => CLOSE,
            Self::Minimize => MINIMIZE,
            Self::Maximize => MAXIMIZE,
            Self::Restore => RESTORE,
            Self::Center => CENTER,
            Self::SetTitle(_) => TITLE,
            Self::Resize { .. } => RESIZE,
            Self::ShowAlert(_) => ALERT,
        }
    }
}

fn expect_arity(function: &'static str, args: &[Value], expected: usize) -> Result<(), BridgeError> {
    if args.len() != expected {
        return Err(BridgeError::Arity {
            function,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn string_arg(function: &'static str, args: &[Value], index: usize) -> Result<String, BridgeError> {
    args[index]
        .as_str()
        .map(str::to_string)
        .ok_or(BridgeError::ArgumentType {
            function,
            index,
            expected: "a string",
        })
}

fn int_arg(function: &'static str, args: &[Value], index: usize) -> Result<i32, BridgeError> {
    args[index]
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or(BridgeError::ArgumentType {
            function,
            index,
            expected: "a 32-bit integer",
        })
}

/// Promise bookkeeping on the script side. Must run before the bindings.
pub const BRIDGE_RUNTIME_SCRIPT: &str = r#"
(function() {
    if (window.__mata_bridge) {
        return;
    }
    var pending = {};
    var nextId = 1;
    window.__mata_bridge = {
        invoke: function(name, args) {
            return new Promise(function(resolve, reject) {
                var id = nextId++;
                pending[id] = { resolve: resolve, reject: reject };
                window.ipc.postMessage(JSON.stringify({ id: id, name: name, args: args }));
            });
        },
        settle: function(id, error) {
            var entry = pending[id];
            if (!entry) {
                return;
            }
            delete pending[id];
            if (error === null) {
                entry.resolve();
            } else {
                entry.reject(new Error(error));
            }
        }
    };
})();
"#;

/// Suppresses reload shortcuts and the context menu outside debug mode.
pub const INPUT_GUARD_SCRIPT: &str = r#"
document.addEventListener('keydown', function(event) {
    if ((event.ctrlKey && (event.key === 'r' || event.key === 'R')) || event.key === 'F5') {
        event.preventDefault();
    }
});
document.addEventListener('contextmenu', function(event) {
    event.preventDefault();
});
"#;

/// Declare one global function per binding, each forwarding to the bridge.
pub fn bindings_script() -> String {
    let names: Vec<&str> = BINDINGS.iter().map(|b| b.name).collect();
    let names_json = serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string());
    format!(
        "(function() {{\n    {names_json}.forEach(function(name) {{\n        \
         window[name] = function() {{\n            \
         return window.__mata_bridge.invoke(name, Array.prototype.slice.call(arguments));\n        \
         }};\n    }});\n}})();\n"
    )
}

/// Declare `window.mata`, forwarding each member 1:1 to its bound global.
pub fn namespace_script() -> String {
    let mut script = String::from("window.mata = window.mata || {};\nwindow.mata.win = window.mata.win || {};\n");
    for binding in BINDINGS {
        script.push_str(&format!(
            "window.mata.{} = window.{};\n",
            binding.member, binding.name
        ));
    }
    script
}

/// Settle the pending Promise for call `id`. `None` resolves it.
pub fn settle_script(id: u64, error: Option<&str>) -> String {
    let error_json = serde_json::to_string(&error)
        .unwrap_or_else(|_| "\"bridge error\"".to_string());
    format!("window.__mata_bridge && window.__mata_bridge.settle({id}, {error_json});")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: Value) -> BridgeCall {
        BridgeCall {
            id: 1,
            name: name.to_string(),
            args: serde_json::from_value(args).unwrap(),
        }
    }

    #[test]
    fn parses_call_from_json() {
        let c = BridgeCall::from_json(r#"{"id":7,"name":"mata_win_resize","args":[800,600]}"#)
            .unwrap();
        assert_eq!(c.id, 7);
        assert_eq!(c.name, RESIZE);
        assert_eq!(c.args, vec![json!(800), json!(600)]);
    }

    #[test]
    fn missing_args_default_to_empty() {
        let c = BridgeCall::from_json(r#"{"id":3,"name":"mata_win_close"}"#).unwrap();
        assert!(c.args.is_empty());
        assert_eq!(BridgeCommand::from_call(&c).unwrap(), BridgeCommand::Close);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            BridgeCall::from_json("not json"),
            Err(BridgeError::Malformed(_))
        ));
        assert!(matches!(
            BridgeCall::from_json(r#"{"name":"mata_win_close"}"#),
            Err(BridgeError::Malformed(_))
        ));
    }

    #[test]
    fn marshals_every_binding() {
        assert_eq!(
            BridgeCommand::from_call(&call(MINIMIZE, json!([]))).unwrap(),
            BridgeCommand::Minimize
        );
        assert_eq!(
            BridgeCommand::from_call(&call(MAXIMIZE, json!([]))).unwrap(),
            BridgeCommand::Maximize
        );
        assert_eq!(
            BridgeCommand::from_call(&call(RESTORE, json!([]))).unwrap(),
            BridgeCommand::Restore
        );
        assert_eq!(
            BridgeCommand::from_call(&call(CENTER, json!([]))).unwrap(),
            BridgeCommand::Center
        );
        assert_eq!(
            BridgeCommand::from_call(&call(TITLE, json!(["Hello"]))).unwrap(),
            BridgeCommand::SetTitle("Hello".into())
        );
        assert_eq!(
            BridgeCommand::from_call(&call(RESIZE, json!([1024, 768]))).unwrap(),
            BridgeCommand::Resize {
                width: 1024,
                height: 768
            }
        );
        assert_eq!(
            BridgeCommand::from_call(&call(ALERT, json!(["hi"]))).unwrap(),
            BridgeCommand::ShowAlert("hi".into())
        );
    }

    #[test]
    fn non_positive_sizes_still_marshal() {
        // Validation of the size itself belongs to the window controller.
        assert_eq!(
            BridgeCommand::from_call(&call(RESIZE, json!([0, -5]))).unwrap(),
            BridgeCommand::Resize {
                width: 0,
                height: -5
            }
        );
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let err = BridgeCommand::from_call(&call(RESIZE, json!([800]))).unwrap_err();
        assert_eq!(
            err,
            BridgeError::Arity {
                function: RESIZE,
                expected: 2,
                got: 1
            }
        );

        let err = BridgeCommand::from_call(&call(CLOSE, json!([true]))).unwrap_err();
        assert!(matches!(err, BridgeError::Arity { expected: 0, got: 1, .. }));
    }

    #[test]
    fn argument_type_mismatch_is_an_error() {
        let err = BridgeCommand::from_call(&call(TITLE, json!([42]))).unwrap_err();
        assert_eq!(
            err,
            BridgeError::ArgumentType {
                function: TITLE,
                index: 0,
                expected: "a string"
            }
        );

        let err = BridgeCommand::from_call(&call(RESIZE, json!([800, "600"]))).unwrap_err();
        assert!(matches!(err, BridgeError::ArgumentType { index: 1, .. }));

        let err = BridgeCommand::from_call(&call(RESIZE, json!([800.5, 600]))).unwrap_err();
        assert!(matches!(err, BridgeError::ArgumentType { index: 0, .. }));

        let err = BridgeCommand::from_call(&call(RESIZE, json!([4_294_967_296i64, 600])))
            .unwrap_err();
        assert!(matches!(err, BridgeError::ArgumentType { index: 0, .. }));
    }

    #[test]
    fn unknown_function_is_an_error() {
        let err = BridgeCommand::from_call(&call("eval", json!(["1+1"]))).unwrap_err();
        assert_eq!(err, BridgeError::UnknownFunction("eval".into()));

        // Names are case-sensitive.
        assert!(BridgeCommand::from_call(&call("MATA_WIN_CLOSE", json!([]))).is_err());
    }

    #[test]
    fn binding_round_trips_through_name() {
        let commands = [
            BridgeCommand::Close,
            BridgeCommand::Minimize,
            BridgeCommand::Maximize,
            BridgeCommand::Restore,
            BridgeCommand::Center,
            BridgeCommand::SetTitle(String::new()),
            BridgeCommand::Resize {
                width: 1,
                height: 1,
            },
            BridgeCommand::ShowAlert(String::new()),
        ];
        for command in commands {
            assert!(
                BINDINGS.iter().any(|b| b.name == command.binding()),
                "{command:?} has no binding"
            );
        }
    }

    #[test]
    fn binding_table_is_unique() {
        for (i, a) in BINDINGS.iter().enumerate() {
            for b in &BINDINGS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.member, b.member);
            }
        }
        assert_eq!(BINDINGS.len(), 8);
    }

    #[test]
    fn bindings_script_declares_every_global() {
        let script = bindings_script();
        for binding in BINDINGS {
            assert!(
                script.contains(&format!("\"{}\"", binding.name)),
                "missing {}",
                binding.name
            );
        }
        assert!(script.contains("window.__mata_bridge.invoke"));
    }

    #[test]
    fn namespace_script_forwards_members() {
        let script = namespace_script();
        assert!(script.contains("window.mata.win.close = window.mata_win_close;"));
        assert!(script.contains("window.mata.win.title = window.mata_win_title;"));
        assert!(script.contains("window.mata.win.resize = window.mata_win_resize;"));
        assert!(script.contains("window.mata.alert = window.mata_alert;"));
    }

    #[test]
    fn settle_script_resolves_with_null() {
        assert_eq!(
            settle_script(4, None),
            "window.__mata_bridge && window.__mata_bridge.settle(4, null);"
        );
    }

    #[test]
    fn settle_script_quotes_error_text() {
        let script = settle_script(9, Some("bad \"arg\"\n</script>"));
        assert!(script.contains(r#"settle(9, "bad \"arg\"\n</script>")"#));
    }

    #[test]
    fn runtime_script_posts_json_over_ipc() {
        assert!(BRIDGE_RUNTIME_SCRIPT.contains("window.ipc.postMessage"));
        assert!(BRIDGE_RUNTIME_SCRIPT.contains("settle"));
    }
}
