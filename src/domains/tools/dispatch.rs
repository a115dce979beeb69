//! Generic per-domain dispatch.
//!
//! A domain is a table of [`Operation`]s. Each operation pairs a
//! [`ToolDescriptor`] with one platform call; running it always follows the
//! same steps:
//!
//! 1. validate the raw arguments against the schema of the parameter struct;
//! 2. decode them into the operation's typed parameters;
//! 3. invoke the platform;
//! 4. tag any platform failure with the operation's failure prefix.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::contract::{InputContract, ValidatedArgs};
use super::error::ToolError;
use crate::apillon::{ApillonApi, ApillonResult};
use crate::core::config::SecurityConfig;

/// Long-lived handles every operation may use. Read-only after start-up.
#[derive(Clone)]
pub struct ToolContext {
    pub platform: Arc<dyn ApillonApi>,
    pub security: Arc<SecurityConfig>,
}

impl ToolContext {
    pub fn new(platform: Arc<dyn ApillonApi>, security: SecurityConfig) -> Self {
        Self {
            platform,
            security: Arc::new(security),
        }
    }
}

/// Name, description and input contract of a tool.
#[derive(Debug)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub contract: InputContract,
}

impl ToolDescriptor {
    /// Describe a tool taking parameters `P`.
    pub fn new<P: JsonSchema>(name: &'static str, description: &'static str) -> Result<Self, ToolError> {
        let contract = InputContract::of::<P>()
            .map_err(|e| ToolError::internal(format!("input schema of {} does not compile: {}", name, e)))?;
        Ok(Self {
            name,
            description,
            contract,
        })
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.contract.schema().clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

type Handler =
    Box<dyn Fn(ToolContext, ValidatedArgs) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// One row of a domain table.
pub struct Operation {
    descriptor: ToolDescriptor,
    handler: Handler,
}

impl Operation {
    /// Build an operation from its name, its description, the prefix used
    /// when the platform call fails (e.g. "Failed to create bucket"), and the
    /// call itself, which receives the decoded parameters `P`. The input
    /// schema is derived from `P`.
    pub fn new<P, F, Fut>(
        name: &'static str,
        description: &'static str,
        failure: &'static str,
        call: F,
    ) -> Result<Self, ToolError>
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(ToolContext, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApillonResult<Value>> + Send + 'static,
    {
        let descriptor = ToolDescriptor::new::<P>(name, description)?;
        let tool = descriptor.name;
        let handler: Handler = Box::new(move |context, args| match args.parse::<P>() {
            Ok(params) => call(context, params)
                .map(move |result| result.map_err(|e| ToolError::collaborator(failure, e)))
                .boxed(),
            Err(e) => {
                let err = ToolError::internal(format!("{} parameters could not be decoded: {}", tool, e));
                futures::future::ready(Err(err)).boxed()
            }
        });

        Ok(Self {
            descriptor,
            handler,
        })
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Validate `arguments` against this operation's contract.
    pub fn validate(&self, arguments: &JsonObject) -> Result<ValidatedArgs, ToolError> {
        self.descriptor
            .contract
            .validate(arguments)
            .map_err(|errors| ToolError::validation(self.descriptor.name, errors))
    }

    /// Validate and run the operation.
    pub async fn execute(&self, context: &ToolContext, arguments: &JsonObject) -> Result<Value, ToolError> {
        let args = self.validate(arguments)?;
        debug!(tool = self.descriptor.name, "Arguments validated");
        (self.handler)(context.clone(), args).await
    }
}

/// A capability area and the operations it declares, in declaration order.
pub struct Domain {
    name: &'static str,
    operations: Vec<Operation>,
}

impl Domain {
    pub fn new(name: &'static str, operations: Vec<Operation>) -> Self {
        Self { name, operations }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.iter().map(Operation::name)
    }

    /// The operation named `tool`, if this domain declares it.
    pub fn find(&self, tool: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name() == tool)
    }
}
