//! Human-readable description of where a parameter's owner sits in the graph.

/// Names around a parameter owner, already looked up by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerPlacement<'a> {
    Component,
    SubComponent {
        component: Option<&'a str>,
    },
    Port {
        component: Option<&'a str>,
    },
    Interface {
        from: Option<&'a str>,
        to_port: Option<&'a str>,
        to_subcomponent: Option<&'a str>,
    },
}

/// Describe the owner's parent or connection. Components have none.
pub fn parent_info(placement: OwnerPlacement<'_>) -> Option<String> {
    match placement {
        OwnerPlacement::Component => None,
        OwnerPlacement::SubComponent { component } => Some(match component {
            Some(name) => format!("Component: {name}"),
            None => "No parent component".to_string(),
        }),
        OwnerPlacement::Port { component } => Some(match component {
            Some(name) => format!("Component: {name}"),
            None => "No parent info".to_string(),
        }),
        OwnerPlacement::Interface {
            from,
            to_port,
            to_subcomponent,
        } => {
            let parts: Vec<String> = [
                from.map(|n| format!("From: {n}")),
                to_port.map(|n| format!("To: {n}")),
                to_subcomponent.map(|n| format!("To SubComp: {n}")),
            ]
            .into_iter()
            .flatten()
            .collect();

            Some(if parts.is_empty() {
                "No connection info".to_string()
            } else {
                parts.join(", ")
            })
        }
    }
}
