use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Center a `width` x `height` rectangle in `frame_area`, clamped to fit
pub fn centered_popup(frame_area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(frame_area.width);
    let popup_height = height.min(frame_area.height);

    let popup_x = frame_area.x + (frame_area.width.saturating_sub(popup_width)) / 2;
    let popup_y = frame_area.y + (frame_area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Scale `length` by `percent`, clamp to `min..=max`, and leave `margin` free
pub fn scaled_length(length: u16, percent: u16, min: u16, max: u16, margin: u16) -> u16 {
    let scaled = (u32::from(length) * u32::from(percent) / 100) as u16;
    scaled.clamp(min, max).min(length.saturating_sub(margin))
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}
