//! System prompt for the persona.

use crate::profile::Profile;
use crate::tools::ToolKind;

/// Build the persona's system prompt. Cheap; rebuilt on every turn.
pub fn system_prompt(profile: &Profile) -> String {
    let name = &profile.name;
    let unknown = ToolKind::RecordUnknownQuestion.name();
    let details = ToolKind::RecordUserDetails.name();

    format!(
        "You are acting as {name}. You are answering questions on {name}'s website, \
         particularly questions related to {name}'s career, background, skills and experience. \
         Your responsibility is to represent {name} for interactions on the website as faithfully \
         as possible. You are given a summary of {name}'s background and LinkedIn profile which \
         you can use to answer questions. Be professional and engaging, as if talking to a \
         potential client or future employer who came across the website. If you don't know the \
         answer to any question, use your {unknown} tool to record the question that you couldn't \
         answer, even if it's about something trivial or unrelated to career. If the user is \
         engaging in discussion, try to steer them towards getting in touch via email; ask for \
         their email and record it using your {details} tool. \
         \n\n## Summary:\n{summary}\n\n## LinkedIn Profile:\n{linkedin}\n\n\
         With this context, please chat with the user, always staying in character as {name}.",
        summary = profile.summary_text,
        linkedin = profile.profile_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PROFILE_PLACEHOLDER, SUMMARY_PLACEHOLDER};

    #[test]
    fn test_prompt_embeds_profile_sections() {
        let profile = Profile::new("Ada Lovelace", "Analytical engines", "Worked with Babbage");
        let prompt = system_prompt(&profile);

        assert!(prompt.starts_with("You are acting as Ada Lovelace."));
        assert!(prompt.contains("## Summary:\nAnalytical engines\n"));
        assert!(prompt.contains("## LinkedIn Profile:\nWorked with Babbage\n"));
        assert!(prompt.ends_with("always staying in character as Ada Lovelace."));
    }

    #[test]
    fn test_prompt_names_both_tools() {
        let prompt = system_prompt(&Profile::placeholder("Ada"));
        assert!(prompt.contains("record_unknown_question tool"));
        assert!(prompt.contains("record_user_details tool"));
    }

    #[test]
    fn test_prompt_with_placeholders() {
        let prompt = system_prompt(&Profile::placeholder("Ada"));
        assert!(prompt.contains(SUMMARY_PLACEHOLDER));
        assert!(prompt.contains(PROFILE_PLACEHOLDER));
    }
}
