//! Widget view
//!
//! Renders a [`CalculatorWidget`] into a [`DomElement`] tree. Element ids
//! are stable so drivers and tests can address them.

use super::dom::DomElement;
use super::keypad::WasmKeypad;
use crate::clock::Clock;
use crate::core::number::format_number;
use crate::core::totals::badge_class;
use crate::core::TagTotal;
use crate::store::KeyValueStore;
use crate::widget::CalculatorWidget;

/// Equation line
pub const EQUATION_ID: &str = "calc-equation";
/// Formatted display
pub const DISPLAY_ID: &str = "calc-display";
/// Tag selector bound to the current tag
pub const TAG_SELECT_ID: &str = "tag-select";
/// New tag text input
pub const NEW_TAG_INPUT_ID: &str = "new-tag-input";
/// Add-tag button
pub const ADD_TAG_BUTTON_ID: &str = "btn-add-tag";
/// Totals panel
pub const TOTALS_PANEL_ID: &str = "totals-panel";
/// History panel
pub const HISTORY_PANEL_ID: &str = "history-panel";
/// Clear-history button
pub const CLEAR_HISTORY_BUTTON_ID: &str = "btn-clear-history";
/// History filter selector bound to the selected tag
pub const HISTORY_FILTER_ID: &str = "history-filter";

const HISTORY_ROW_PREFIX: &str = "history-";

/// Element id of the filtered history row `index`
#[must_use]
pub fn history_row_id(index: usize) -> String {
    format!("{HISTORY_ROW_PREFIX}{index}")
}

/// Element id of the memo line under history row `index`
#[must_use]
pub fn memo_id(index: usize) -> String {
    format!("memo-{index}")
}

/// Element id of the totals row `index`
#[must_use]
pub fn total_row_id(index: usize) -> String {
    format!("total-{index}")
}

/// Parses a history row id back into its index
#[must_use]
pub fn parse_history_row_id(id: &str) -> Option<usize> {
    id.strip_prefix(HISTORY_ROW_PREFIX)?.parse().ok()
}

/// Renders the whole widget
#[must_use]
pub fn render<S: KeyValueStore, C: Clock>(
    widget: &CalculatorWidget<S, C>,
    keypad: &WasmKeypad,
    new_tag_draft: &str,
) -> DomElement {
    DomElement::new("div")
        .with_id("calculator")
        .with_class("w-96 mx-auto bg-gray-200 p-4 rounded-lg shadow-lg")
        .with_child(
            DomElement::new("div")
                .with_id(EQUATION_ID)
                .with_class("bg-white p-2 mb-2 rounded text-right text-lg h-8 overflow-hidden")
                .with_text(widget.equation()),
        )
        .with_child(
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_class("bg-white p-2 mb-4 rounded text-right text-2xl h-12 overflow-hidden")
                .with_text(&widget.formatted_display()),
        )
        .with_child(keypad.create_keypad_element())
        .with_child(render_tag_controls(widget, new_tag_draft))
        .with_child(render_totals(&widget.tag_totals()))
        .with_child(render_history(widget))
}

fn render_select<'a>(
    id: &str,
    value: &str,
    class: &str,
    tags: impl Iterator<Item = &'a str>,
) -> DomElement {
    DomElement::new("select")
        .with_id(id)
        .with_class(class)
        .with_attr("value", value)
        .with_children(tags.map(|tag| {
            let option = DomElement::new("option").with_attr("value", tag).with_text(tag);
            if tag == value {
                option.with_attr("selected", "selected")
            } else {
                option
            }
        }))
}

fn render_tag_controls<S: KeyValueStore, C: Clock>(
    widget: &CalculatorWidget<S, C>,
    new_tag_draft: &str,
) -> DomElement {
    DomElement::new("div")
        .with_class("mb-4")
        .with_child(render_select(
            TAG_SELECT_ID,
            widget.current_tag(),
            "w-full p-2 mb-2 border rounded",
            widget.tags().iter(),
        ))
        .with_child(
            DomElement::new("div")
                .with_class("flex")
                .with_child(
                    DomElement::new("input")
                        .with_id(NEW_TAG_INPUT_ID)
                        .with_class("flex-grow p-2 border rounded-l")
                        .with_attr("placeholder", "New tag")
                        .with_attr("value", new_tag_draft),
                )
                .with_child(
                    DomElement::new("button")
                        .with_id(ADD_TAG_BUTTON_ID)
                        .with_class("bg-blue-500 text-white p-2 rounded-r")
                        .with_text("Add"),
                ),
        )
}

/// Renders the ranked totals panel
#[must_use]
pub fn render_totals(totals: &[TagTotal]) -> DomElement {
    let rows = totals.iter().enumerate().map(|(i, total)| {
        let row_id = total_row_id(i);
        let mut badges = DomElement::new("div").with_class("flex items-center");
        if i != 0 {
            badges = badges.with_child(
                DomElement::new("p")
                    .with_id(&format!("{row_id}-difference"))
                    .with_class("text-red-500 text-sm mr-2")
                    .with_text(&format!("(-{})", format_number(total.difference))),
            );
        }
        if let Some(rank) = total.rank {
            badges = badges.with_child(
                DomElement::new("span")
                    .with_id(&format!("{row_id}-rank"))
                    .with_class(badge_class(Some(rank)))
                    .with_class("font-bold px-2 py-1 rounded")
                    .with_text(rank.label()),
            );
        }

        DomElement::new("div")
            .with_id(&row_id)
            .with_class("mb-2 p-2 border rounded")
            .with_attr("data-tag", &total.tag)
            .with_child(
                DomElement::new("h4")
                    .with_class("text-sm font-bold")
                    .with_text(&total.tag),
            )
            .with_child(
                DomElement::new("div")
                    .with_class("py-2 flex justify-between items-center")
                    .with_child(
                        DomElement::new("p")
                            .with_id(&format!("{row_id}-amount"))
                            .with_class("font-bold")
                            .with_text(&format_number(total.total)),
                    )
                    .with_child(badges),
            )
    });

    DomElement::new("div")
        .with_class("bg-white p-2 rounded mb-4")
        .with_child(
            DomElement::new("h3")
                .with_class("text-lg font-bold mb-2")
                .with_text("Top tags"),
        )
        .with_child(
            DomElement::new("div")
                .with_id(TOTALS_PANEL_ID)
                .with_class("h-60 overflow-y-auto")
                .with_children(rows),
        )
}

fn render_history<S: KeyValueStore, C: Clock>(widget: &CalculatorWidget<S, C>) -> DomElement {
    let rows = widget
        .filtered_history()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut row = DomElement::new("div").with_class("mb-1 text-sm").with_child(
                DomElement::new("div")
                    .with_id(&history_row_id(i))
                    .with_class("cursor-pointer")
                    .with_attr("data-tag", &entry.tag)
                    .with_attr("data-calculation", &entry.calculation)
                    .with_text(&entry.display()),
            );
            if let Some(memo) = widget.memo(i) {
                row = row.with_child(
                    DomElement::new("div")
                        .with_id(&memo_id(i))
                        .with_class("text-xs text-gray-600 ml-4")
                        .with_text(&format!("Memo: {memo}")),
                );
            }
            row
        });

    DomElement::new("div")
        .with_class("bg-white p-2 rounded")
        .with_child(
            DomElement::new("div")
                .with_class("flex justify-between items-center mb-2")
                .with_child(
                    DomElement::new("h3")
                        .with_class("text-lg font-bold")
                        .with_text("History"),
                )
                .with_child(
                    DomElement::new("button")
                        .with_id(CLEAR_HISTORY_BUTTON_ID)
                        .with_class("bg-red-500 hover:bg-red-600 text-white text-sm p-2 rounded")
                        .with_text("Clear history"),
                ),
        )
        .with_child(render_select(
            HISTORY_FILTER_ID,
            widget.selected_tag(),
            "w-full mb-2 p-2 border rounded",
            widget.tags().iter(),
        ))
        .with_child(
            DomElement::new("div")
                .with_id(HISTORY_PANEL_ID)
                .with_class("h-40 overflow-y-auto")
                .with_children(rows),
        )
}
