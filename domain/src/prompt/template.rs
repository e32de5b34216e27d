//! Prompt templates for the self-play flow

use crate::core::task::Task;
use crate::team::agent::Agent;
use crate::team::role::GeneratedRole;
use crate::util::preview;

/// Longest slice of prior content quoted back to the novelty checker.
const PRIOR_CONTENT_PREVIEW_CHARS: usize = 400;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the role generation phase
    pub fn role_generation_system() -> &'static str {
        r#"You are a team architect designing a group of specialist roles to solve a task together.
Each role must be distinct, concrete, and directly useful for the task at hand.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for role generation
    pub fn role_generation_prompt(task: &Task, min_roles: usize, max_roles: usize) -> String {
        let mut prompt = format!(
            r#"Design between {} and {} specialist roles for the following task.

Task: {}
Domain: {}
"#,
            min_roles, max_roles, task.description, task.domain
        );

        if !task.requirements.is_empty() {
            prompt.push_str("\nRequirements:\n");
            for requirement in &task.requirements {
                prompt.push_str(&format!("- {}\n", requirement));
            }
        }
        if !task.constraints.is_empty() {
            prompt.push_str("\nConstraints:\n");
            for constraint in &task.constraints {
                prompt.push_str(&format!("- {}\n", constraint));
            }
        }

        prompt.push_str(
            r#"
Respond with JSON in exactly this shape:

```json
{
  "roles": [
    {
      "name": "Role name",
      "role_type": "specialist category",
      "responsibilities": ["first duty", "second duty"],
      "skills": ["first skill", "second skill"],
      "output_requirements": "what this role must deliver",
      "priority_level": 7
    }
  ]
}
```

priority_level is an integer from 1 (support) to 10 (lead). Give each role a different emphasis."#,
        );

        prompt
    }

    /// System prompt for the permission assignment phase
    pub fn permission_system() -> &'static str {
        r#"You are designing the communication structure of a specialist team.
Decide which roles may send their output directly to which other roles.
Higher-priority roles should sit closer to the center of the structure.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for permission assignment
    pub fn permission_prompt(roles: &[GeneratedRole]) -> String {
        let mut prompt = String::from("Team roles:\n");
        for role in roles {
            let duties = role
                .responsibilities
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join("; ");
            prompt.push_str(&format!(
                "- {} ({}, priority {}): {}\n",
                role.name, role.role_type, role.priority_level, duties
            ));
        }

        prompt.push_str(
            r#"
For every role, list the names of the other roles it may send output to.
Every role must be able to receive work from somewhere, and results must be able to flow back up to the highest-priority role.

Respond with JSON in exactly this shape:

```json
{
  "permissions": {
    "Role name": ["Other role name", "Another role name"]
  }
}
```"#,
        );

        prompt
    }

    /// System prompt for one agent's generation turn
    pub fn actor_system(agent: &Agent) -> String {
        let mut prompt = format!(
            r#"You are {}, acting as {}.
"#,
            agent.name, agent.role
        );

        if !agent.responsibilities.is_empty() {
            prompt.push_str("\nYour responsibilities:\n");
            for responsibility in &agent.responsibilities {
                prompt.push_str(&format!("- {}\n", responsibility));
            }
        }
        if !agent.skills.is_empty() {
            prompt.push_str("\nYour skills:\n");
            for skill in &agent.skills {
                prompt.push_str(&format!("- {}\n", skill));
            }
        }
        if !agent.output_requirements.is_empty() {
            prompt.push_str(&format!(
                "\nYour output must satisfy: {}\n",
                agent.output_requirements
            ));
        }

        prompt.push_str("\nStay in role. Produce your own contribution, not a summary of others.");
        prompt
    }

    /// User prompt for one agent's generation turn
    pub fn actor_prompt(
        task: &Task,
        context: Option<&str>,
        deliveries: &[(String, String)],
        iteration: u32,
    ) -> String {
        let mut prompt = format!(
            r#"Task: {}

This is round {} of the work."#,
            task.description, iteration
        );

        if let Some(context) = context {
            prompt.push_str(&format!("\n\nAdditional context:\n{}", context));
        }

        if !deliveries.is_empty() {
            prompt.push_str("\n\nContributions delivered to you from the previous round:\n");
            for (sender, content) in deliveries {
                prompt.push_str(&format!("\n--- {} ---\n{}\n", sender, content));
            }
            prompt.push_str(
                "\nImprove on these where your role allows; do not merely restate them.",
            );
        }

        prompt.push_str("\n\nProduce your contribution for this round.");
        prompt
    }

    /// System prompt for the critique phase
    pub fn critic_system() -> &'static str {
        r#"You are a critical reviewer scoring a teammate's contribution.
Be fair but thorough. Identify both strengths and weaknesses.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for scoring one contribution
    pub fn critic_prompt(task_description: &str, author: &str, content: &str) -> String {
        format!(
            r#"Task: {}

Contribution by {}:
---
{}
---

Score this contribution. Respond with JSON in exactly this shape:

```json
{{
  "overall_score": 7.5,
  "satisfaction_score": 0.8,
  "summary_critique": "2-3 sentence assessment"
}}
```

overall_score is 0-10 for overall quality. satisfaction_score is 0.0-1.0 for how well the contribution satisfies the task requirements."#,
            task_description, author, content
        )
    }

    /// System prompt for the novelty phase
    pub fn novelty_system() -> &'static str {
        r#"You assess how novel a contribution is relative to earlier material.
A contribution that restates earlier material scores near 0. A contribution introducing genuinely new ideas, structure, or evidence scores near 1.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for scoring one contribution's novelty
    pub fn novelty_prompt(content: &str, prior_content: &[String]) -> String {
        let mut prompt = String::from("Earlier material from this session:\n");
        for (index, prior) in prior_content.iter().enumerate() {
            prompt.push_str(&format!(
                "\n--- Earlier item {} ---\n{}\n",
                index + 1,
                preview(prior, PRIOR_CONTENT_PREVIEW_CHARS)
            ));
        }

        prompt.push_str(&format!(
            r#"
New contribution:
---
{}
---

Respond with JSON in exactly this shape:

```json
{{
  "novelty_score": 0.6
}}
```

novelty_score is 0.0-1.0."#,
            content
        ));

        prompt
    }
}
