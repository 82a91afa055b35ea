/// One-button message shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub action: String,
}

/// Two-button confirmation shown before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub keep_label: String,
    pub confirm_label: String,
}

/// User-facing texts of a concrete wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardCopy {
    pub title: String,
    pub next_action: String,
    pub back_action: String,
    pub terminal_action: String,
    pub cancel_prompt: ConfirmPrompt,
    pub success_title: String,
    /// `{name}` is replaced with the created entity's display name.
    pub success_message: String,
    pub failure: Notice,
}

impl WizardCopy {
    /// Texts for a wizard creating a `noun` (e.g. "event").
    pub fn for_entity(noun: &str, title_noun: &str) -> Self {
        Self {
            title: format!("Create {title_noun}"),
            next_action: "Next".into(),
            back_action: "Back".into(),
            terminal_action: format!("Create {title_noun}"),
            cancel_prompt: ConfirmPrompt {
                title: format!("Cancel {title_noun} Creation?"),
                message: "Your progress will be lost if you cancel now.".into(),
                keep_label: "Keep Editing".into(),
                confirm_label: "Cancel".into(),
            },
            success_title: format!("{title_noun} Created!"),
            success_message: format!(
                "Your {noun} '{{name}}' has been created successfully and is now live."
            ),
            failure: Notice {
                title: format!("{title_noun} Creation Failed"),
                message: format!("Sorry, we couldn't create your {noun}. Please try again."),
                action: "OK".into(),
            },
        }
    }

    pub fn success_notice(&self, name: &str) -> Notice {
        Notice {
            title: self.success_title.clone(),
            message: self.success_message.replace("{name}", name),
            action: "Done".into(),
        }
    }
}
