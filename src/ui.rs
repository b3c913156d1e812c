use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode, Screen};
use crate::data::{
    self, format_rupees, CONNECTED_SERVICES, RECENT_SAVES, SHOPPING_TRIGGERS, STAT_CARDS,
    WEEKLY_SAVINGS,
};
use crate::intervention::{Decision, FlowStep, InterventionFlow};
use crate::therapist::{Role, QUICK_PROMPTS};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    match app.screen {
        Screen::Dashboard => render_dashboard(frame, body_area),
        Screen::Settings => render_settings(app, frame, body_area),
        Screen::Therapist => render_therapist(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    // Overlays (in order of priority)
    if app.intervention.is_some() {
        render_intervention(app, frame, area);
    } else if app.settings.editing {
        render_setting_editor(app, frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let summary = format!(
        " This week: ₹{} saved · {} impulses stopped ",
        format_rupees(data::WEEK_SAVED),
        data::WEEK_IMPULSES
    );

    let title = Line::from(vec![
        Span::styled(" ImpulseStopper ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("Your AI Guardian", Style::default().fg(Color::Gray)),
        Span::styled(summary, Style::default().fg(Color::Green)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.screen {
        Screen::Dashboard => " DASHBOARD ",
        Screen::Settings => " SETTINGS ",
        Screen::Therapist => " THERAPIST ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints: Vec<Span> = if let Some(flow) = &app.intervention {
        match flow.step {
            FlowStep::Prompt => vec![
                Span::styled(" s ", key_style),
                Span::styled(" skip it ", label_style),
                Span::styled(" t ", key_style),
                Span::styled(" talk it out ", label_style),
                Span::styled(" b ", key_style),
                Span::styled(" buy anyway ", label_style),
                Span::styled(" Esc ", key_style),
                Span::styled(" dismiss ", label_style),
            ],
            FlowStep::Result => vec![
                Span::styled(" Enter ", key_style),
                Span::styled(" continue ", label_style),
            ],
        }
    } else {
        match (app.screen, app.input_mode) {
            (Screen::Dashboard, InputMode::Normal) => vec![
                Span::styled(" 2 ", key_style),
                Span::styled(" settings ", label_style),
                Span::styled(" 3 ", key_style),
                Span::styled(" therapist ", label_style),
                Span::styled(" p ", key_style),
                Span::styled(" intercept ", label_style),
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ],
            (Screen::Settings, InputMode::Normal) => vec![
                Span::styled(" j/k ", key_style),
                Span::styled(" nav ", label_style),
                Span::styled(" Enter ", key_style),
                Span::styled(" change ", label_style),
                Span::styled(" 1/3 ", key_style),
                Span::styled(" screens ", label_style),
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ],
            (Screen::Settings, InputMode::Editing) => vec![
                Span::styled(" Enter ", key_style),
                Span::styled(" save ", label_style),
                Span::styled(" Esc ", key_style),
                Span::styled(" cancel ", label_style),
            ],
            (Screen::Therapist, InputMode::Normal) => vec![
                Span::styled(" i ", key_style),
                Span::styled(" type ", label_style),
                Span::styled(" j/k ", key_style),
                Span::styled(" scroll ", label_style),
                Span::styled(" c/r/x ", key_style),
                Span::styled(" starters ", label_style),
                Span::styled(" 1/2 ", key_style),
                Span::styled(" screens ", label_style),
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ],
            (Screen::Therapist, InputMode::Editing) => vec![
                Span::styled(" Enter ", key_style),
                Span::styled(" send ", label_style),
                Span::styled(" Esc ", key_style),
                Span::styled(" stop typing ", label_style),
            ],
            _ => vec![],
        }
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_dashboard(frame: &mut Frame, area: Rect) {
    let [banner_area, stats_area, charts_area, recent_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Min(8),
        Constraint::Length(8),
    ])
    .areas(area);

    // Welcome banner
    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            "You're crushing it! 💪",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(vec![
            Span::raw("You've saved "),
            Span::styled(
                format!("₹{}", format_rupees(data::MONTHLY_SAVED)),
                Style::default().fg(Color::Green).bold(),
            ),
            Span::raw(" this month by avoiding impulse purchases"),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: true });
    frame.render_widget(banner, banner_area);

    // Stat cards
    let card_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(stats_area);
    let card_colors = [Color::Green, Color::Blue, Color::Magenta, Color::Yellow];
    for ((card, card_area), color) in STAT_CARDS.iter().zip(card_areas.iter()).zip(card_colors) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", card.title));
        let text = Text::from(vec![
            Line::from(Span::styled(card.value, Style::default().bold())),
            Line::from(vec![
                Span::styled(card.change, Style::default().fg(color)),
                Span::styled(
                    format!("  {}", card.description),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ]);
        frame.render_widget(Paragraph::new(text).block(block), *card_area);
    }

    // Charts: savings trend and trigger moods side by side
    let [trend_area, mood_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(charts_area);

    let trend_data: Vec<(&str, u64)> = WEEKLY_SAVINGS.iter().map(|d| (d.day, d.saved)).collect();
    let impulses_this_week: u64 = WEEKLY_SAVINGS.iter().map(|d| d.impulses).sum();
    let trend = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(
                    " Weekly Savings Trend (₹) · {impulses_this_week} impulses caught "
                )),
        )
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        .data(&trend_data);
    frame.render_widget(trend, trend_area);

    let mood_data: Vec<(&str, u64)> = SHOPPING_TRIGGERS
        .iter()
        .map(|t| (t.mood, t.percent))
        .collect();
    let moods = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Shopping Triggers (%) "),
        )
        .bar_width(8)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::Black).bg(Color::Blue))
        .data(&mood_data);
    frame.render_widget(moods, mood_area);

    // Recent saves
    let items: Vec<ListItem> = RECENT_SAVES
        .iter()
        .map(|save| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(save.item, Style::default().fg(Color::Yellow).bold()),
                    Span::styled(
                        format!("  ₹{}", format_rupees(save.amount)),
                        Style::default().fg(Color::Green).bold(),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("{} · {} · {}", save.reason, save.time_ago, save.mood),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let recent = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recent Saves — your latest victories over impulse buying "),
    );
    frame.render_widget(recent, recent_area);
}

fn render_settings(app: &mut App, frame: &mut Frame, area: Rect) {
    let [rows_area, services_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(5)]).areas(area);

    let items: Vec<ListItem> = app
        .settings
        .rows()
        .iter()
        .map(|row| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", row.section),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(row.label, Style::default().bold()),
                    Span::raw("  "),
                    Span::styled(row.display_value(), Style::default().fg(Color::Cyan)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", row.description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Settings — customize your ImpulseStopper experience "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, rows_area, &mut app.settings.state);

    let service_items: Vec<ListItem> = CONNECTED_SERVICES
        .iter()
        .map(|service| {
            let status_color = match service.status {
                "Not Connected" => Color::Gray,
                _ => Color::Green,
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {}  ", service.name)),
                Span::styled(service.status, Style::default().fg(status_color)),
            ]))
        })
        .collect();

    let services = List::new(service_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Connected Services "),
    );
    frame.render_widget(services, services_area);
}

fn render_therapist(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, prompts_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" AI Therapist · online — your judgment-free zone for shopping emotions ");

    let mut lines: Vec<Line> = Vec::new();
    for message in app.conversation.messages() {
        let (who, who_style) = match message.role {
            Role::User => ("You", Style::default().fg(Color::Cyan).bold()),
            Role::Agent => ("Therapist", Style::default().fg(Color::Yellow).bold()),
        };
        lines.push(Line::from(vec![
            Span::styled(who, who_style),
            Span::styled(
                format!(" · {}", message.sent_at.format("%H:%M")),
                Style::default().fg(Color::Gray),
            ),
        ]));
        for text_line in message.text.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::default());
    }

    if app.composing {
        lines.push(Line::from(Span::styled(
            "Therapist",
            Style::default().fg(Color::Yellow).bold(),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{dots}"),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, chat_area);

    // Quick conversation starters
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let mut starter_spans = Vec::new();
    for (key, (label, _)) in ["c", "r", "x"].iter().zip(QUICK_PROMPTS.iter()) {
        starter_spans.push(Span::styled(format!(" {key} "), key_style));
        starter_spans.push(Span::raw(format!(" {label}  ")));
    }
    frame.render_widget(Paragraph::new(Line::from(starter_spans)), prompts_area);

    // Input box; dimmed while a reply is pending since sending is gated
    let editing = app.input_mode == InputMode::Editing;
    let input_border_color = if app.composing {
        Color::DarkGray
    } else if editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let input_title = if app.composing {
        " Therapist is typing… "
    } else {
        " Share what's on your mind (i to type, Enter to send) "
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(input_title);

    // Horizontal scrolling keeps the cursor visible in a narrow box.
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let cursor_pos = app.chat_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };
    let visible_text: String = app
        .chat_input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);
    frame.render_widget(input, input_area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((input_area.x + cursor_x + 1, input_area.y + 1));
    }
}

fn render_intervention(app: &App, frame: &mut Frame, area: Rect) {
    let Some(flow) = &app.intervention else {
        return;
    };

    let popup_width = 58.min(area.width.saturating_sub(4));
    let popup_height = match flow.step {
        FlowStep::Prompt => 19,
        FlowStep::Result => 11,
    }
    .min(area.height.saturating_sub(2));
    let popup_area = centered(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Hold up! 🛑 Let's think about this… ");

    let lines = match flow.step {
        FlowStep::Prompt => prompt_step_lines(flow),
        FlowStep::Result => result_step_lines(flow),
    };

    let popup = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(popup, popup_area);
}

fn prompt_step_lines(flow: &InterventionFlow) -> Vec<Line<'static>> {
    let breakdown = flow.breakdown();
    vec![
        Line::from(Span::styled(
            flow.candidate.name,
            Style::default().bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!("₹{}", format_rupees(flow.candidate.price)),
                Style::default().fg(Color::Blue).bold(),
            ),
            Span::styled(
                format!(" on {}", flow.candidate.site),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            flow.candidate.image_url,
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Your AI conscience says:",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(flow.prompt.clone()),
        Line::default(),
        Line::from(Span::styled(
            "This purchase equals:",
            Style::default().bold(),
        )),
        Line::from(format!("  • {} hours of work", breakdown.work_hours)),
        Line::from(format!("  • {} coffee dates", breakdown.coffees)),
        Line::from(format!("  • {} Uber rides", breakdown.rides)),
        Line::default(),
        Line::from(Span::styled(
            " s  🎉 You're right, I'll skip this",
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            " t  💭 Talk to AI Therapist",
            Style::default().fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            " b  I'll buy it anyway",
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn result_step_lines(flow: &InterventionFlow) -> Vec<Line<'static>> {
    let price = format_rupees(flow.candidate.price);
    let mut lines = match flow.decision.unwrap_or(Decision::Skip) {
        Decision::Skip => vec![
            Line::from(Span::styled(
                "Great choice! 🎉",
                Style::default().fg(Color::Green).bold(),
            )),
            Line::default(),
            Line::from(format!("You just saved ₹{price} by thinking it through!")),
            Line::from(Span::styled(
                format!(
                    "This brings your total monthly savings to ₹{}.",
                    format_rupees(data::MONTHLY_SAVED_AFTER_SKIP)
                ),
                Style::default().fg(Color::Green),
            )),
        ],
        Decision::Consult => vec![
            Line::from(Span::styled(
                "Great choice! 🎉",
                Style::default().fg(Color::Green).bold(),
            )),
            Line::default(),
            Line::from(format!("₹{price} is still in your pocket while you talk it over.")),
            Line::from(Span::styled(
                "Your therapist is ready — the chat opens when you close this.",
                Style::default().fg(Color::Magenta),
            )),
        ],
        Decision::Proceed => vec![
            Line::from(Span::styled(
                "Purchase noted.",
                Style::default().fg(Color::Yellow).bold(),
            )),
            Line::default(),
            Line::from(format!("₹{price} to {}.", flow.candidate.site)),
            Line::from("We'll check in on how it feels in a week."),
        ],
    };
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter  continue shopping mindfully",
        Style::default().fg(Color::Gray),
    )));
    lines
}

fn render_setting_editor(app: &App, frame: &mut Frame, area: Rect) {
    let Some(row) = app.settings.selected() else {
        return;
    };

    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 7;
    let popup_area = centered(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Edit {} ", row.label));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let instructions = Paragraph::new("Type a value. Press Enter to save, Esc to cancel.")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(instructions, Rect::new(inner.x, inner.y, inner.width, 1));

    let prefix = row.prefix.unwrap_or("");
    let input_line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Gray)),
        Span::styled(
            app.settings.edit_buffer.clone(),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    let input_area = Rect::new(inner.x, inner.y + 2, inner.width, 1);
    frame.render_widget(Paragraph::new(input_line), input_area);

    let prefix_width = prefix.chars().count();
    let cursor_x = (prefix_width + app.settings.edit_cursor).min(input_area.width as usize) as u16;
    frame.set_cursor_position((input_area.x + cursor_x, input_area.y));

    let description = Paragraph::new(row.description).style(Style::default().fg(Color::Gray));
    frame.render_widget(description, Rect::new(inner.x, inner.y + 4, inner.width, 1));
}

/// Rect of the given size centered in `area`.
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height.min(area.height))
}
