use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use term_compose::actions::Action;
use term_compose::compose::compose;
use term_compose::descriptor::{
    CompartmentDescriptor, Descriptors, MenuDescriptor, MenuItem, ToolEntry,
};
use term_compose::document::InMemoryDocuments;
use term_compose::navigator::Focus;
use term_compose::paint::{self, UiFrame};
use term_compose::params::{ToggleOption, WidgetParams};
use term_compose::registry::Registry;
use term_compose::shell::Shell;
use term_compose::state::InteractionState;
use term_compose::widgets;

#[derive(Parser, Debug)]
#[command(
    name = "compose-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Measures full and incremental composition over synthetic descriptors"
)]
struct BenchCli {
    /// Number of state transitions to dispatch.
    #[arg(short = 'p', long = "passes", value_name = "N", default_value_t = 10_000)]
    passes: usize,

    /// Compartments in the synthetic tool box.
    #[arg(short = 'c', long = "compartments", value_name = "N", default_value_t = 24)]
    compartments: usize,

    /// Tools per compartment.
    #[arg(short = 't', long = "tools", value_name = "N", default_value_t = 12)]
    tools: usize,

    /// Also paint every tree into an offscreen 160x50 buffer.
    #[arg(long = "paint")]
    paint: bool,
}

struct BenchConfig {
    passes: usize,
    compartments: usize,
    tools: usize,
    paint: bool,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=10_000_000).contains(&cli.passes) {
            return Err("passes must be between 1 and 10000000".to_string());
        }
        if !(1..=10_000).contains(&cli.compartments) {
            return Err("compartments must be between 1 and 10000".to_string());
        }
        if cli.tools > 1_000 {
            return Err("tools must be at most 1000".to_string());
        }
        Ok(Self {
            passes: cli.passes,
            compartments: cli.compartments,
            tools: cli.tools,
            paint: cli.paint,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let registry = Arc::new(Registry::new());
    widgets::register_builtin(&registry).map_err(io::Error::other)?;
    let descriptors = synthetic_descriptors(config.compartments, config.tools);
    let mut shell = Shell::mount(descriptors, Arc::clone(&registry), InteractionState::new())
        .map_err(io::Error::other)?;

    let stats = run_benchmark(&mut shell, &config);
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn synthetic_descriptors(compartments: usize, tools: usize) -> Descriptors {
    let mut file = MenuDescriptor::new("file", "File");
    for i in 0..8 {
        file = file.item(MenuItem::new(format!("item-{i}"), format!("Item {i}")));
    }
    let mut desc = Descriptors::new("bench")
        .menu(file)
        .menu(MenuDescriptor::new("help", "Help").item(MenuItem::new("about", "About")));
    for c in 0..compartments {
        let mut compartment =
            CompartmentDescriptor::new(format!("c{c}"), format!("Compartment {c}"));
        for t in 0..tools {
            compartment = compartment.tool(synthetic_tool(t));
        }
        desc = desc.compartment(compartment);
    }
    desc
}

fn synthetic_tool(index: usize) -> ToolEntry {
    let id = format!("tool-{index}");
    match index % 4 {
        0 => ToolEntry::new(id, widgets::BUTTON, WidgetParams::button(format!("Run {index}"))),
        1 => ToolEntry::new(
            id,
            widgets::TOGGLE_LIST,
            WidgetParams::ToggleList {
                items: vec![
                    ToggleOption::new("a", "Alpha", true),
                    ToggleOption::new("b", "Beta", false),
                ],
            },
        ),
        2 => ToolEntry::new(
            id,
            widgets::SLIDER,
            WidgetParams::Slider {
                min: 0,
                max: 100,
                value: index as i64 % 100,
            },
        ),
        _ => ToolEntry::new(id, widgets::TEXT, WidgetParams::text("synthetic")),
    }
}

/// The transition applied on pass `n`. Cycles through compartment toggles
/// and menu navigation so every subtree kind gets rebuilt at some point.
fn transition(n: usize, compartments: usize) -> Action {
    match n % 4 {
        0 | 2 => Action::ToggleCompartment(format!("c{}", (n / 4) % compartments)),
        1 => {
            let item = format!("item-{}", n % 8);
            Action::open_menu(["file", item.as_str()])
        }
        _ => Action::CloseMenu,
    }
}

fn run_benchmark(shell: &mut Shell, config: &BenchConfig) -> BenchStats {
    let mut stats = BenchStats::new();
    let area = Rect::new(0, 0, 160, 50);
    let mut buffer = Buffer::empty(area);
    let documents = InMemoryDocuments::new();

    for n in 0..config.passes {
        let started = Instant::now();
        shell.dispatch(transition(n, config.compartments));
        let elapsed = started.elapsed();
        let report = shell.last_report();
        stats.record_incremental(elapsed, report.reused, report.rebuilt);

        if config.paint {
            let started = Instant::now();
            buffer.reset();
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            paint::paint(&mut frame, shell.current_tree(), &documents, Focus::default(), "");
            stats.paint_time += started.elapsed();
        }
    }

    // Baseline: the same number of full passes over the final state.
    let snapshot = shell.registry().snapshot();
    let started = Instant::now();
    for _ in 0..config.passes {
        let tree = compose(shell.descriptors(), shell.state(), &snapshot);
        std::hint::black_box(tree);
    }
    stats.full_time = started.elapsed();
    stats
}

struct BenchStats {
    passes: u64,
    incremental_time: Duration,
    full_time: Duration,
    paint_time: Duration,
    slowest_pass: Duration,
    reused: u64,
    rebuilt: u64,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            passes: 0,
            incremental_time: Duration::ZERO,
            full_time: Duration::ZERO,
            paint_time: Duration::ZERO,
            slowest_pass: Duration::ZERO,
            reused: 0,
            rebuilt: 0,
        }
    }

    fn record_incremental(&mut self, elapsed: Duration, reused: usize, rebuilt: usize) {
        self.passes = self.passes.saturating_add(1);
        self.incremental_time += elapsed;
        if elapsed > self.slowest_pass {
            self.slowest_pass = elapsed;
        }
        self.reused = self.reused.saturating_add(reused as u64);
        self.rebuilt = self.rebuilt.saturating_add(rebuilt as u64);
    }

    fn average_us(&self, total: Duration) -> f64 {
        if self.passes == 0 {
            return 0.0;
        }
        (total.as_secs_f64() / self.passes as f64) * 1_000_000.0
    }

    fn reuse_ratio(&self) -> f64 {
        let total = self.reused + self.rebuilt;
        if total == 0 {
            return 0.0;
        }
        self.reused as f64 / total as f64
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let paint = if config.paint {
            format!("{:.2} us/frame", self.average_us(self.paint_time))
        } else {
            "skipped".to_string()
        };
        indoc::formatdoc!(
            r#"
            Compose bench: {passes} passes over {compartments} compartments x {tools} tools.
            Incremental: {incremental:.2} us/pass (slowest {slowest:.2} us)
            Full compose: {full:.2} us/pass
            Subtrees reused: {reused} | rebuilt: {rebuilt} ({ratio:.1}% reuse)
            Paint: {paint}
            "#,
            passes = self.passes,
            compartments = config.compartments,
            tools = config.tools,
            incremental = self.average_us(self.incremental_time),
            slowest = self.slowest_pass.as_secs_f64() * 1_000_000.0,
            full = self.average_us(self.full_time),
            reused = self.reused,
            rebuilt = self.rebuilt,
            ratio = self.reuse_ratio() * 100.0,
            paint = paint,
        )
    }
}
