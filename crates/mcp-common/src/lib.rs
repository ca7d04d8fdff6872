//! Wire types shared by the guidance MCP servers in this workspace.
pub mod mcp_api;
