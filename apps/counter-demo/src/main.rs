use std::time::Duration;

use hookterm_app::AppOptions;
use hookterm_core::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use hookterm_core::prelude::*;
use hookterm_core::Result;
use hookterm_macros::{component, element, Props};
use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};
use ratatui::Viewport;

const TICK: Duration = Duration::from_millis(250);

#[derive(Default, Props)]
struct TickerProps {
    period: Duration,
    on_tick: Handler<()>,
}

/// Calls `on_tick` once per period for as long as it stays mounted.
#[component]
fn Ticker(mut hooks: Hooks, props: &mut TickerProps) -> Element<Fragment> {
    let period = props.period;
    let mut on_tick = props.on_tick.take();
    hooks.use_future(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            on_tick.call(());
        }
    });
    Element::new(FragmentProps::default())
}

fn sized<W>(widget: W, height: u16) -> AnyElement
where
    W: Widget + Clone + Send + Sync + 'static,
{
    Element::<Adapter>::new(
        AdapterProps::widget(widget)
            .with_layout(LayoutStyle::default().with_height(Constraint::Length(height))),
    )
    .into_any()
}

#[component]
fn CounterApp(mut hooks: Hooks) -> Element<View> {
    let count = hooks.use_state(|| 0u32);
    let running = hooks.use_state(|| true);
    let exit = hooks.use_exit();
    let printer = hooks.use_insert_before();

    let (count_keys, running_keys) = (count.clone(), running.clone());
    hooks.use_events(move |event| {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };
        match code {
            KeyCode::Char(' ') => running_keys.set(!running_keys.get()),
            KeyCode::Char('r') => count_keys.set(0),
            KeyCode::Char('q') | KeyCode::Esc => exit.exit(),
            _ => {}
        }
    });

    let current = count.get();
    hooks.use_effect(
        || {
            if current > 0 && current % 10 == 0 {
                log::info!("counter reached {current}");
                printer.render_before(Line::from(format!("reached {current}")), 1);
            }
        },
        current,
    );

    let status = if running.get() { "running" } else { "paused" };
    let counter = Paragraph::new(format!("Counter: {current}"))
        .block(Block::bordered().title(format!(" hookterm ({status}) ")));
    let mut ticks = count.clone();
    element!(View {
        #(sized(counter, 3)),
        #(sized(Line::from("space: pause/resume   r: reset   q: quit"), 1)),
        #(running.get().then(|| element!(Ticker(period: TICK, on_tick: move |()| ticks += 1)))),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let inline = std::env::args().any(|arg| arg == "--inline");
    let mut options = AppOptions::default().with_log_target("counter-demo.log");
    if inline {
        options = options.with_viewport(Viewport::Inline(5));
    }
    hookterm_app::run_with_options(options, Element::<CounterApp>::new(NoProps)).await
}
