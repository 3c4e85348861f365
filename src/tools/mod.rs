//! Tools module — tool definitions and execution for agent function calling
//!
//! This module provides the infrastructure for defining and executing the
//! tools an agent can call through the stdio transport.
//!
//! # Overview
//!
//! - `Tool` trait: the interface all tools implement
//! - `ToolRegistry`: central registry for managing and executing tools
//!
//! # Built-in Tools
//!
//! - `AddTool`: add two integers
//! - `PageContentTool`: fetch a webpage as markdown, SSRF-guarded
//! - `DocSearchTool`: search the documentation index

pub mod docs;
pub mod math;
mod registry;
mod types;
pub mod web;

pub use docs::DocSearchTool;
pub use math::AddTool;
pub use registry::ToolRegistry;
pub use types::{Tool, ToolDefinition};
pub use web::PageContentTool;
