//! 通知バナー

use leptos::prelude::*;
use lifeline_admin_common::{Feedback, Severity};

#[component]
pub fn FeedbackBanner<F>(feedback: Signal<Option<Feedback>>, on_dismiss: F) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    move || {
        feedback.get().map(|fb| {
            let on_dismiss = on_dismiss.clone();
            view! {
                <div class=format!("feedback {}", severity_class(fb.severity)) role="alert">
                    <span class="feedback-message">{fb.message}</span>
                    <button class="btn-close" on:click=move |_| on_dismiss()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "feedback-success",
        Severity::Error => "feedback-error",
        Severity::Info => "feedback-info",
    }
}
