//! Prompt contracts: fixed text exchanged with models

mod prompts;

pub use prompts::{
    agent_description, investigation_system_prompt, transcript_system_prompt,
    transcript_user_prompt,
};
