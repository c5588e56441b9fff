//! Detail views: one element with everything around it.
//!
//! Parameters carry their full type, collaborator data is copied through,
//! and each kind adds its neighbours: a component its children and the
//! interfaces leaving it, a child its parent component, an interface both of
//! its ends.

use archgraph_core::interface::{describe_attached, describe_interface};
use archgraph_core::owner::OwnerRef;
use archgraph_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::PgPool;

use crate::collaborators::CollaboratorLookup;
use crate::models::collaborator::CollaboratorRecord;
use crate::models::component::Component;
use crate::models::element::ElementFields;
use crate::models::interface::Interface;
use crate::models::parameter::Parameter;
use crate::models::parameter_type::ParameterType;
use crate::models::port::Port;
use crate::models::subcomponent::SubComponent;
use crate::models::version::Version;
use crate::projections::diagram::ImageView;
use crate::projections::summary::{
    ComponentSummary, ElementSummary, InterfaceSummary, OwnedPortSummary,
    OwnedSubComponentSummary, PortSummary, SubComponentSummary,
};
use crate::repositories::{
    ComponentRepo, ImageRepo, InterfaceRepo, ParameterRepo, ParameterTypeRepo, PortRepo,
    SubComponentRepo,
};

/// A parameter with its type expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailParameter {
    pub id: DbId,
    pub name: String,
    pub value: Option<String>,
    pub secret: bool,
    pub parameter_type: Option<ParameterType>,
    pub owner: Option<OwnerRef>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields every detail view shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDetail {
    #[serde(flatten)]
    pub element: ElementSummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: Option<Version>,
    /// System under test of the element's version.
    pub sut: Option<serde_json::Value>,
    pub parameters: Vec<DetailParameter>,
    pub images: Vec<ImageView>,
    pub vulnerabilities: Vec<CollaboratorRecord>,
    pub flow_executions: Vec<CollaboratorRecord>,
}

impl ElementDetail {
    async fn load(
        pool: &PgPool,
        collaborators: &dyn CollaboratorLookup,
        fields: &ElementFields,
        owner: OwnerRef,
    ) -> Result<Self, sqlx::Error> {
        let parameters = ParameterRepo::list_by_owner(pool, owner).await?;
        let parameters = expand_parameter_types(pool, parameters).await?;
        let images = ImageRepo::list_by_owner(pool, owner).await?;

        let version = match fields.version_id {
            Some(id) => collaborators.version(id).await?,
            None => None,
        };
        let sut = version.as_ref().and_then(|v| v.sut.clone());

        Ok(Self {
            element: ElementSummary::from(fields),
            created_at: fields.created_at,
            updated_at: fields.updated_at,
            version,
            sut,
            parameters,
            images: images.iter().map(ImageView::from).collect(),
            vulnerabilities: collaborators.vulnerabilities(owner).await?,
            flow_executions: collaborators.flow_executions(owner).await?,
        })
    }
}

async fn expand_parameter_types(
    pool: &PgPool,
    parameters: Vec<Parameter>,
) -> Result<Vec<DetailParameter>, sqlx::Error> {
    let type_ids: Vec<DbId> = parameters.iter().filter_map(|p| p.parameter_type_id).collect();
    let types = ParameterTypeRepo::find_many(pool, &type_ids).await?;

    Ok(parameters
        .into_iter()
        .map(|p| {
            let parameter_type = p
                .parameter_type_id
                .and_then(|id| types.iter().find(|t| t.id == id).cloned());
            DetailParameter {
                owner: p.owner().ok(),
                id: p.id,
                name: p.name,
                value: p.value,
                secret: p.secret,
                parameter_type,
                created_at: p.created_at,
                updated_at: p.updated_at,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDetail {
    #[serde(flatten)]
    pub detail: ElementDetail,
    pub subcomponents: Vec<OwnedSubComponentSummary>,
    pub ports: Vec<OwnedPortSummary>,
    /// Interfaces whose source port belongs to this component.
    pub interfaces: Vec<InterfaceSummary>,
}

impl ComponentDetail {
    pub async fn load(
        pool: &PgPool,
        collaborators: &dyn CollaboratorLookup,
        component: &Component,
    ) -> Result<Self, sqlx::Error> {
        let id = component.element.id;
        let detail =
            ElementDetail::load(pool, collaborators, &component.element, OwnerRef::Component(id))
                .await?;
        let subcomponents = SubComponentRepo::list_by_component(pool, id).await?;
        let ports = PortRepo::list_by_component(pool, id).await?;
        let interfaces = InterfaceRepo::list_from_component(pool, id).await?;

        Ok(Self {
            detail,
            subcomponents: subcomponents.iter().map(OwnedSubComponentSummary::from).collect(),
            ports: ports.iter().map(OwnedPortSummary::from).collect(),
            interfaces: interfaces.iter().map(InterfaceSummary::from).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Sub-component / Port
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubComponentDetail {
    #[serde(flatten)]
    pub detail: ElementDetail,
    /// The parent component row.
    pub component: Option<Component>,
}

impl SubComponentDetail {
    pub async fn load(
        pool: &PgPool,
        collaborators: &dyn CollaboratorLookup,
        subcomponent: &SubComponent,
    ) -> Result<Self, sqlx::Error> {
        let owner = OwnerRef::SubComponent(subcomponent.element.id);
        Ok(Self {
            detail: ElementDetail::load(pool, collaborators, &subcomponent.element, owner).await?,
            component: ComponentRepo::find_by_id(pool, subcomponent.component_id).await?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortDetail {
    #[serde(flatten)]
    pub detail: ElementDetail,
    /// The parent component row.
    pub component: Option<Component>,
}

impl PortDetail {
    pub async fn load(
        pool: &PgPool,
        collaborators: &dyn CollaboratorLookup,
        port: &Port,
    ) -> Result<Self, sqlx::Error> {
        let owner = OwnerRef::Port(port.element.id);
        Ok(Self {
            detail: ElementDetail::load(pool, collaborators, &port.element, owner).await?,
            component: ComponentRepo::find_by_id(pool, port.component_id).await?,
        })
    }
}

// ---------------------------------------------------------------------------
// Interface
// ---------------------------------------------------------------------------

/// One end of an interface with the component it hangs off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint<T: Serialize> {
    #[serde(flatten)]
    pub summary: T,
    pub parent_component: Option<ComponentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDetail {
    #[serde(flatten)]
    pub detail: ElementDetail,
    #[serde(rename = "type")]
    pub interface_type: String,
    pub port_from: Option<Endpoint<PortSummary>>,
    pub port_to_port: Option<Endpoint<PortSummary>>,
    pub port_to_subcomponent: Option<Endpoint<SubComponentSummary>>,
    /// `"{component} - {port} <--> {component} - {target}"`, or the source
    /// alone when unconnected.
    pub connection: String,
}

impl InterfaceDetail {
    pub async fn load(
        pool: &PgPool,
        collaborators: &dyn CollaboratorLookup,
        interface: &Interface,
    ) -> Result<Self, sqlx::Error> {
        let owner = OwnerRef::Interface(interface.element.id);
        let detail = ElementDetail::load(pool, collaborators, &interface.element, owner).await?;

        let port_from = port_endpoint(pool, Some(interface.port_from_id)).await?;
        let port_to_port = port_endpoint(pool, interface.port_to_port_id).await?;
        let port_to_subcomponent = match interface.port_to_subcomponent_id {
            Some(id) => match SubComponentRepo::find_by_id(pool, id).await? {
                Some(sub) => Some(Endpoint {
                    parent_component: ComponentRepo::find_by_id(pool, sub.component_id)
                        .await?
                        .as_ref()
                        .map(ComponentSummary::from),
                    summary: SubComponentSummary::from(&sub),
                }),
                None => None,
            },
            None => None,
        };

        let from_label = port_from
            .as_ref()
            .map(endpoint_label)
            .unwrap_or_default();
        let to_label = port_to_port
            .as_ref()
            .map(endpoint_label)
            .or_else(|| port_to_subcomponent.as_ref().map(endpoint_label));
        let connection = describe_interface(&from_label, to_label.as_deref());

        Ok(Self {
            detail,
            interface_type: interface.interface_type.clone(),
            port_from,
            port_to_port,
            port_to_subcomponent,
            connection,
        })
    }
}

async fn port_endpoint(
    pool: &PgPool,
    id: Option<DbId>,
) -> Result<Option<Endpoint<PortSummary>>, sqlx::Error> {
    let Some(id) = id else {
        return Ok(None);
    };
    let Some(port) = PortRepo::find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let parent = ComponentRepo::find_by_id(pool, port.component_id).await?;
    Ok(Some(Endpoint {
        summary: PortSummary::from(&port),
        parent_component: parent.as_ref().map(ComponentSummary::from),
    }))
}

/// Anything with a name that may hang off a component.
trait Labelled {
    fn name(&self) -> &str;
}

impl Labelled for PortSummary {
    fn name(&self) -> &str {
        &self.element.name
    }
}

impl Labelled for SubComponentSummary {
    fn name(&self) -> &str {
        &self.element.name
    }
}

fn endpoint_label<T: Serialize + Labelled>(endpoint: &Endpoint<T>) -> String {
    match &endpoint.parent_component {
        Some(parent) => describe_attached(&parent.element.name, endpoint.summary.name()),
        None => endpoint.summary.name().to_string(),
    }
}
