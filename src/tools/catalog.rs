//! Tools that are declared but have no handler yet.
//!
//! They are not registered with the router, so calling them over MCP
//! returns the runtime's "tool not found" error.

use crate::core::tool::{ParamDescriptor, ParamKind, ToolDescriptor};

pub const EXPLAIN_JOB_SCHEDULING: ToolDescriptor = ToolDescriptor {
    name: "explain_job_scheduling",
    title: "Explain why my job is not scheduled",
    description: "Gathers information about why a job is not scheduled.",
    params: &[
        ParamDescriptor {
            name: "namespace",
            kind: ParamKind::String,
            description: "Namespace of the job",
        },
        ParamDescriptor {
            name: "job_name",
            kind: ParamKind::String,
            description: "Name of the job to explain scheduling for",
        },
    ],
};

pub const LOCAL_QUEUE_STATUS: ToolDescriptor = ToolDescriptor {
    name: "local_queue_status",
    title: "Why no workloads are admitted in the LocalQueue",
    description: "Provides information about why no workloads are admitted in the LocalQueue.",
    params: &[
        ParamDescriptor {
            name: "namespace",
            kind: ParamKind::String,
            description: "Namespace of the LocalQueue",
        },
        ParamDescriptor {
            name: "local_queue_name",
            kind: ParamKind::String,
            description: "Name of the LocalQueue to explain scheduling for",
        },
    ],
};

pub const PLANNED_TOOLS: &[ToolDescriptor] = &[EXPLAIN_JOB_SCHEDULING, LOCAL_QUEUE_STATUS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_tools_are_named() {
        let names: Vec<_> = PLANNED_TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["explain_job_scheduling", "local_queue_status"]);
    }

    #[test]
    fn planned_params_are_strings() {
        let schema = EXPLAIN_JOB_SCHEDULING.input_schema();
        assert_eq!(schema["properties"]["job_name"]["type"], "string");
        assert_eq!(schema["properties"]["namespace"]["type"], "string");
    }
}
