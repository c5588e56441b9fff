//! Parameters projected with their owner.
//!
//! The owner is resolved once into an [`OwnerRef`] and every shape decision
//! is a `match` on it. [`ParameterProjector`] memoises the rows it looks up
//! so projecting a whole listing costs one query per distinct neighbour.

use std::collections::HashMap;

use archgraph_core::describe::{parent_info, OwnerPlacement};
use archgraph_core::element::ElementKind;
use archgraph_core::owner::OwnerRef;
use archgraph_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

use crate::models::component::Component;
use crate::models::interface::Interface;
use crate::models::parameter::Parameter;
use crate::models::parameter_type::ParameterType;
use crate::models::port::Port;
use crate::models::subcomponent::SubComponent;
use crate::projections::summary::{
    ComponentSummary, InterfaceSummary, ParameterTypeSummary, PortSummary, SubComponentSummary,
};
use crate::repositories::{
    ComponentRepo, InterfaceRepo, ParameterTypeRepo, PortRepo, SubComponentRepo,
};

/// Minimal view of whichever element owns a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OwnerSummary {
    Component(ComponentSummary),
    SubComponent(SubComponentSummary),
    Port(PortSummary),
    Interface(InterfaceSummary),
}

/// A parameter with its owner's kind and minimal view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterView {
    pub id: DbId,
    pub name: String,
    pub value: Option<String>,
    pub secret: bool,
    pub element_type: Option<ElementKind>,
    pub element_detail: Option<OwnerSummary>,
    /// Name of the parameter type.
    pub parameter_type: Option<String>,
    pub parameter_type_detail: Option<ParameterTypeSummary>,
}

/// `{id, name}` of an interface end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRef {
    pub id: DbId,
    pub name: String,
}

/// Both ends of an interface-owned parameter's interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_from: Option<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_to: Option<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcomponent_to: Option<NamedRef>,
}

/// A parameter with its owner and the owner's place in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteParameter {
    #[serde(flatten)]
    pub view: ParameterView,
    /// E.g. `"Component: Core"` or `"From: P1, To: P2"`. `None` for
    /// component-owned parameters.
    pub parent_info: Option<String>,
    pub parent_component: Option<ComponentSummary>,
    /// Only for interface-owned parameters.
    pub connection_details: Option<ConnectionDetails>,
}

/// Builds parameter projections, caching looked-up rows.
pub struct ParameterProjector<'a> {
    pool: &'a PgPool,
    components: HashMap<DbId, Option<Component>>,
    subcomponents: HashMap<DbId, Option<SubComponent>>,
    ports: HashMap<DbId, Option<Port>>,
    interfaces: HashMap<DbId, Option<Interface>>,
    types: HashMap<DbId, Option<ParameterType>>,
}

impl<'a> ParameterProjector<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            components: HashMap::new(),
            subcomponents: HashMap::new(),
            ports: HashMap::new(),
            interfaces: HashMap::new(),
            types: HashMap::new(),
        }
    }

    /// Owner projection of one parameter.
    pub async fn view(&mut self, parameter: &Parameter) -> Result<ParameterView, sqlx::Error> {
        let owner = parameter.owner_columns().resolve();

        let element_detail = match owner {
            Some(OwnerRef::Component(id)) => self
                .component(id)
                .await?
                .map(|c| OwnerSummary::Component(ComponentSummary::from(&c))),
            Some(OwnerRef::SubComponent(id)) => self
                .subcomponent(id)
                .await?
                .map(|s| OwnerSummary::SubComponent(SubComponentSummary::from(&s))),
            Some(OwnerRef::Port(id)) => self
                .port(id)
                .await?
                .map(|p| OwnerSummary::Port(PortSummary::from(&p))),
            Some(OwnerRef::Interface(id)) => self
                .interface(id)
                .await?
                .map(|i| OwnerSummary::Interface(InterfaceSummary::from(&i))),
            None => None,
        };

        let parameter_type = match parameter.parameter_type_id {
            Some(id) => self.parameter_type(id).await?,
            None => None,
        };

        Ok(ParameterView {
            id: parameter.id,
            name: parameter.name.clone(),
            value: parameter.value.clone(),
            secret: parameter.secret,
            element_type: owner.map(OwnerRef::kind),
            element_detail,
            parameter_type: parameter_type.as_ref().map(|t| t.name.clone()),
            parameter_type_detail: parameter_type.as_ref().map(ParameterTypeSummary::from),
        })
    }

    /// Complete projection of one parameter.
    pub async fn complete(
        &mut self,
        parameter: &Parameter,
    ) -> Result<CompleteParameter, sqlx::Error> {
        let view = self.view(parameter).await?;

        let (parent_info, parent_component, connection_details) =
            match parameter.owner_columns().resolve() {
                None | Some(OwnerRef::Component(_)) => (None, None, None),
                Some(OwnerRef::SubComponent(id)) => {
                    let parent = match self.subcomponent(id).await? {
                        Some(sub) => self.component(sub.component_id).await?,
                        None => None,
                    };
                    let info = parent_info(OwnerPlacement::SubComponent {
                        component: parent.as_ref().map(|c| c.element.name.as_str()),
                    });
                    (info, parent.as_ref().map(ComponentSummary::from), None)
                }
                Some(OwnerRef::Port(id)) => {
                    let parent = match self.port(id).await? {
                        Some(port) => self.component(port.component_id).await?,
                        None => None,
                    };
                    let info = parent_info(OwnerPlacement::Port {
                        component: parent.as_ref().map(|c| c.element.name.as_str()),
                    });
                    (info, parent.as_ref().map(ComponentSummary::from), None)
                }
                Some(OwnerRef::Interface(id)) => self.interface_placement(id).await?,
            };

        Ok(CompleteParameter {
            view,
            parent_info,
            parent_component,
            connection_details,
        })
    }

    /// Project a listing, in order.
    pub async fn views(&mut self, parameters: &[Parameter]) -> Result<Vec<ParameterView>, sqlx::Error> {
        let mut out = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            out.push(self.view(parameter).await?);
        }
        Ok(out)
    }

    /// Complete projection of a listing, in order.
    pub async fn completes(
        &mut self,
        parameters: &[Parameter],
    ) -> Result<Vec<CompleteParameter>, sqlx::Error> {
        let mut out = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            out.push(self.complete(parameter).await?);
        }
        Ok(out)
    }

    async fn interface_placement(
        &mut self,
        id: DbId,
    ) -> Result<
        (Option<String>, Option<ComponentSummary>, Option<ConnectionDetails>),
        sqlx::Error,
    > {
        let Some(interface) = self.interface(id).await? else {
            let info = parent_info(OwnerPlacement::Interface {
                from: None,
                to_port: None,
                to_subcomponent: None,
            });
            return Ok((info, None, Some(ConnectionDetails::default())));
        };

        let from = self.port(interface.port_from_id).await?;
        let to_port = match interface.port_to_port_id {
            Some(id) => self.port(id).await?,
            None => None,
        };
        let to_sub = match interface.port_to_subcomponent_id {
            Some(id) => self.subcomponent(id).await?,
            None => None,
        };
        let parent = match &from {
            Some(port) => self.component(port.component_id).await?,
            None => None,
        };

        let info = parent_info(OwnerPlacement::Interface {
            from: from.as_ref().map(|p| p.element.name.as_str()),
            to_port: to_port.as_ref().map(|p| p.element.name.as_str()),
            to_subcomponent: to_sub.as_ref().map(|s| s.element.name.as_str()),
        });
        let details = ConnectionDetails {
            port_from: from.as_ref().map(|p| named(&p.element.id, &p.element.name)),
            port_to: to_port.as_ref().map(|p| named(&p.element.id, &p.element.name)),
            subcomponent_to: to_sub.as_ref().map(|s| named(&s.element.id, &s.element.name)),
        };

        Ok((info, parent.as_ref().map(ComponentSummary::from), Some(details)))
    }

    async fn component(&mut self, id: DbId) -> Result<Option<Component>, sqlx::Error> {
        if let Some(hit) = self.components.get(&id) {
            return Ok(hit.clone());
        }
        let row = ComponentRepo::find_by_id(self.pool, id).await?;
        self.components.insert(id, row.clone());
        Ok(row)
    }

    async fn subcomponent(&mut self, id: DbId) -> Result<Option<SubComponent>, sqlx::Error> {
        if let Some(hit) = self.subcomponents.get(&id) {
            return Ok(hit.clone());
        }
        let row = SubComponentRepo::find_by_id(self.pool, id).await?;
        self.subcomponents.insert(id, row.clone());
        Ok(row)
    }

    async fn port(&mut self, id: DbId) -> Result<Option<Port>, sqlx::Error> {
        if let Some(hit) = self.ports.get(&id) {
            return Ok(hit.clone());
        }
        let row = PortRepo::find_by_id(self.pool, id).await?;
        self.ports.insert(id, row.clone());
        Ok(row)
    }

    async fn interface(&mut self, id: DbId) -> Result<Option<Interface>, sqlx::Error> {
        if let Some(hit) = self.interfaces.get(&id) {
            return Ok(hit.clone());
        }
        let row = InterfaceRepo::find_by_id(self.pool, id).await?;
        self.interfaces.insert(id, row.clone());
        Ok(row)
    }

    async fn parameter_type(&mut self, id: DbId) -> Result<Option<ParameterType>, sqlx::Error> {
        if let Some(hit) = self.types.get(&id) {
            return Ok(hit.clone());
        }
        let row = ParameterTypeRepo::find_by_id(self.pool, id).await?;
        self.types.insert(id, row.clone());
        Ok(row)
    }
}

fn named(id: &DbId, name: &str) -> NamedRef {
    NamedRef {
        id: *id,
        name: name.to_string(),
    }
}
