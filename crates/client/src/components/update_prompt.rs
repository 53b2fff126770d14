use leptos::{component, view, IntoView, Show};

use crate::update::PendingUpdate;

const BANNER_STYLE: &str = "position: fixed; bottom: 0; left: 0; right: 0; \
    background: #2196f3; color: white; padding: 16px; display: flex; \
    justify-content: space-between; align-items: center; \
    box-shadow: 0 -2px 10px rgba(0,0,0,0.2); z-index: 10000; \
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

const APPLY_BUTTON_STYLE: &str = "background: white; color: #2196f3; border: none; \
    padding: 8px 16px; border-radius: 4px; font-weight: bold; cursor: pointer; \
    margin-right: 8px";

const DISMISS_BUTTON_STYLE: &str = "background: transparent; color: white; \
    border: 1px solid white; padding: 8px 16px; border-radius: 4px; cursor: pointer";

/// Banner offering to switch to a newly installed service worker. Renders
/// nothing until an update is pending; at most one banner is visible at a
/// time because the pending signal holds at most one worker
#[component]
pub fn UpdatePrompt() -> impl IntoView {
    let pending = PendingUpdate::use_pending();

    view! {
        <Show when=move || pending.is_some()>
            <div id="update-banner" style=BANNER_STYLE>
                <div>
                    <strong>"Update available!"</strong>
                    <p style="margin: 4px 0 0 0; font-size: 14px">
                        "A new version is ready to install."
                    </p>
                </div>
                <div>
                    <button style=APPLY_BUTTON_STYLE on:click=move |_| pending.apply()>
                        "Update Now"
                    </button>
                    <button style=DISMISS_BUTTON_STYLE on:click=move |_| pending.dismiss()>
                        "Later"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod test {
    use super::{APPLY_BUTTON_STYLE, BANNER_STYLE, DISMISS_BUTTON_STYLE};

    #[test]
    fn banner_overlays_the_page_bottom() {
        for property in ["position: fixed", "bottom: 0", "box-shadow", "z-index: 10000"] {
            assert!(BANNER_STYLE.contains(property), "banner missing {property}");
        }
    }

    #[test]
    fn apply_button_is_filled_and_dismiss_is_outlined() {
        assert!(APPLY_BUTTON_STYLE.contains("background: white"));
        assert!(APPLY_BUTTON_STYLE.contains("border: none"));
        assert!(DISMISS_BUTTON_STYLE.contains("background: transparent"));
        assert!(DISMISS_BUTTON_STYLE.contains("border: 1px solid white"));

        // Shared control shape
        for style in [APPLY_BUTTON_STYLE, DISMISS_BUTTON_STYLE] {
            assert!(style.contains("padding: 8px 16px"));
            assert!(style.contains("border-radius: 4px"));
            assert!(style.contains("cursor: pointer"));
        }
    }
}
