/// Integration tests for listing and dispatching through the terminal service
use anyhow::{Result, bail};
use nodeterm::{
    CommandSource, DiscoveryError, InvocationResult, InvokeRequest, NodeContext, NodeRef,
    StaticSource, TerminalCommand, TerminalConfig, TerminalError, TerminalService,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Replies with `<prefix>:<argument>`
struct Tagged {
    name: String,
    prefix: &'static str,
}

impl Tagged {
    fn new(name: &str, prefix: &'static str) -> Self {
        Self {
            name: name.to_string(),
            prefix,
        }
    }
}

impl TerminalCommand for Tagged {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Tags its argument"
    }

    fn usage(&self) -> &str {
        "tag <text>"
    }

    fn invoke(&self, argument: Option<&str>, context: &NodeContext) -> Result<InvocationResult> {
        if argument == Some("fail") {
            bail!("asked to fail");
        }
        let message = format!("{}:{}", self.prefix, argument.unwrap_or_default());
        let result = InvocationResult::success(message);
        Ok(match &context.focused_node {
            Some(node) => result.with_payload(serde_json::json!({ "focused": node })),
            None => result,
        })
    }
}

/// Records whether discovery ran
struct Watched {
    inner: StaticSource,
    touched: Arc<AtomicBool>,
}

impl CommandSource for Watched {
    fn discover(&self) -> Result<Vec<Arc<dyn TerminalCommand>>, DiscoveryError> {
        self.touched.store(true, Ordering::SeqCst);
        self.inner.discover()
    }
}

fn service(source: StaticSource) -> TerminalService {
    TerminalService::with_source(&TerminalConfig::enabled(), Arc::new(source))
}

#[test]
fn test_echo_scenario() {
    let service = service(StaticSource::new().register(nodeterm::builtin::EchoCommand));

    let result = service
        .invoke_command(&InvokeRequest::new("echo").with_argument("hi"))
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.message(), "hi");
    assert_eq!(result.payload(), None);
}

#[test]
fn test_empty_registry_scenario() {
    let service = service(StaticSource::new());

    let result = service
        .invoke_command(&InvokeRequest::new("missing"))
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({ "success": false, "message": "Command \"missing\" not found" })
    );
}

#[test]
fn test_disabled_scenario_never_builds_registry() {
    let touched = Arc::new(AtomicBool::new(false));
    let source = Watched {
        inner: StaticSource::new().register(nodeterm::builtin::EchoCommand),
        touched: Arc::clone(&touched),
    };
    let config = TerminalConfig {
        cache_registry: false,
        ..TerminalConfig::default()
    };
    let service = TerminalService::with_source(&config, Arc::new(source));

    let invoke = service.invoke_command(&InvokeRequest::new("echo").with_argument("hi"));
    let list = service.list_commands();

    assert!(matches!(invoke, Err(TerminalError::Disabled)));
    assert!(matches!(list, Err(TerminalError::Disabled)));
    assert!(!touched.load(Ordering::SeqCst));
}

#[test]
fn test_one_descriptor_per_command() {
    let service = service(
        StaticSource::new()
            .register(Tagged::new("alpha", "a"))
            .register(Tagged::new("beta", "b"))
            .register(Tagged::new("gamma", "g")),
    );

    let descriptors = service.describe_commands().unwrap();
    let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();

    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    for descriptor in &descriptors {
        assert_eq!(descriptor.description, "Tags its argument");
        assert_eq!(descriptor.usage, "tag <text>");
    }
}

#[test]
fn test_last_registration_wins() {
    let service = service(
        StaticSource::new()
            .register(Tagged::new("tag", "first"))
            .register(Tagged::new("tag", "second")),
    );

    let result = service
        .invoke_command(&InvokeRequest::new("tag").with_argument("x"))
        .unwrap();

    assert_eq!(result.message(), "second:x");
    assert_eq!(service.list_commands().unwrap().result.len(), 1);
}

#[test]
fn test_node_context_is_threaded_through() {
    let service = service(StaticSource::new().register(Tagged::new("tag", "t")));
    let request = InvokeRequest {
        focused_node: Some(NodeRef::new("node-9")),
        ..InvokeRequest::new("tag")
    };

    let result = service.invoke_command(&request).unwrap();

    assert_eq!(
        result.payload(),
        Some(&serde_json::json!({ "focused": "node-9" }))
    );
}

#[test]
fn test_command_failure_is_request_error() {
    let service = service(StaticSource::new().register(Tagged::new("tag", "t")));

    let error = service
        .invoke_command(&InvokeRequest::new("tag").with_argument("fail"))
        .unwrap_err();

    assert!(matches!(error, TerminalError::CommandFailed { ref name, .. } if name == "tag"));
}

#[test]
fn test_concurrent_dispatches_match_sequential_results() {
    let service = service(
        StaticSource::new()
            .register(Tagged::new("left", "L"))
            .register(Tagged::new("right", "R")),
    );

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = &service;
                scope.spawn(move || {
                    let name = match i % 3 {
                        0 => "left",
                        1 => "right",
                        _ => "nowhere",
                    };
                    let argument = i.to_string();
                    let result = service
                        .invoke_command(&InvokeRequest::new(name).with_argument(argument.clone()))
                        .unwrap();
                    (name, argument, result)
                })
            })
            .collect();

        for handle in handles {
            let (name, argument, result) = handle.join().unwrap();
            match name {
                "left" => assert_eq!(result.message(), format!("L:{argument}")),
                "right" => assert_eq!(result.message(), format!("R:{argument}")),
                _ => assert_eq!(result, InvocationResult::not_found("nowhere")),
            }
        }
    });
}
