use crate::core::conversation::Conversation;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::notice_bar::NOTICE_HEIGHT;
use crate::tui::components::{MessageList, NoticeBar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draw one frame: title, turns, optional notice, input.
pub fn draw_ui(frame: &mut Frame, conversation: &Conversation, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let notice_height = if tui.message_list.notice.is_some() {
        NOTICE_HEIGHT
    } else {
        0
    };
    let input_height = tui.input_box.calculate_height(area.width);

    let layout = Layout::vertical([
        Length(1),
        Min(0),
        Length(notice_height),
        Length(input_height),
    ]);
    let [title_area, list_area, notice_area, input_area] = layout.areas(area);

    let mut title_bar = TitleBar {
        assistant_name: &tui.assistant_name,
        endpoint: &tui.endpoint_label,
        connection: tui.connection,
        turn_count: conversation.transcript().len(),
        in_flight: conversation.state().in_flight,
    };
    title_bar.render(frame, title_area);

    MessageList::new(&mut tui.message_list, &tui.assistant_name, spinner_frame)
        .render(frame, list_area);

    if let Some(message) = tui.message_list.notice.as_deref() {
        NoticeBar { message }.render(frame, notice_area);
    }

    tui.input_box.render(frame, input_area);
}
