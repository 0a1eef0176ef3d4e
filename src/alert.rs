//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element of the page shell,
//! either as the target of a failed htmx request or as an out-of-band swap
//! attached to a successful response.

use maud::{Markup, PreEscaped, html};

/// How long a transient notification stays on screen.
pub const NOTIFICATION_DURATION_MS: u64 = 3000;

/// The ID of the element alerts and notifications are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// An alert that stays until the user dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
            Alert::ErrorSimple { message } => (
                "text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800",
                message,
                String::new(),
            ),
        };

        html! {
            div
                class={"alert p-4 mb-4 text-sm border rounded-lg " (style)}
                role="alert"
            {
                div class="flex justify-between items-start gap-4"
                {
                    div
                    {
                        span class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="font-bold"
                        aria-label="Dismiss"
                        onclick="this.closest('.alert').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

/// The colour scheme of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Red, for problems and empty results.
    Danger,
    /// Blue, for confirmations.
    Info,
}

impl Tone {
    fn background(self) -> &'static str {
        match self {
            Tone::Danger => "#dc3545",
            Tone::Info => "#0d6efd",
        }
    }
}

/// A short message that fades out on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub tone: Tone,
}

impl Notification {
    pub fn danger(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Danger,
        }
    }

    pub fn info(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Info,
        }
    }

    /// Renders the notification as an out-of-band swap into the alert container.
    pub fn into_oob_html(self) -> Markup {
        let dismiss_script = format!(
            "setTimeout(function() {{ \
                const notification = document.getElementById('clear-notification'); \
                if (notification) {{ notification.remove(); }} \
            }}, {NOTIFICATION_DURATION_MS});"
        );

        html! {
            div id=(ALERT_CONTAINER_ID) hx-swap-oob="innerHTML"
            {
                div
                    id="clear-notification"
                    class="notification px-4 py-3 rounded-lg shadow-md text-center"
                    data-tone=(match self.tone { Tone::Danger => "danger", Tone::Info => "info" })
                    style=(format!("background-color: {}; color: #fff;", self.tone.background()))
                {
                    (self.message)
                }

                script { (PreEscaped(dismiss_script)) }
            }
        }
    }
}
