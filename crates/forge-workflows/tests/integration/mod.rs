mod events;
mod frontend_workflow;
