use adaptivecards_core::{
    mount, parse_card, ActionKind, ActionPayload, CallbackHost, CardContext, CardError, HostConfig,
    RenderNode, RenderTree,
};
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;

/// Mount Adaptive Card files and show what they register
#[derive(Parser, Debug)]
#[command(name = "card-preview", version)]
struct Args {
    /// Host config file (.json, .yaml or .yml)
    #[arg(long, value_name = "FILE")]
    host_config: Option<PathBuf>,

    /// Execute the first submit action and print the merged payload
    #[arg(long)]
    submit: bool,

    /// Log mounts and dispatch decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    #[arg(required = true, value_name = "CARD")]
    files: Vec<PathBuf>,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let args = Args::parse();

    if args.verbose && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    let host_config = match args.host_config.as_deref().map(HostConfig::from_path).transpose() {
        Ok(config) => Rc::new(config.unwrap_or_default()),
        Err(e) => {
            eprintln!("✗ host config has errors:");
            print_error(&e);
            process::exit(1);
        }
    };

    let mut exit_code = 0;
    for path in &args.files {
        match preview_file(path, &host_config, args.submit) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("✗ {} has errors:", path.display());
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn preview_file(path: &Path, host_config: &Rc<HostConfig>, submit: bool) -> Result<(), CardError> {
    let content = fs::read_to_string(path).map_err(|e| CardError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let card = parse_card(&content)?;

    let mut executed: Vec<ActionPayload> = Vec::new();
    {
        let host = CallbackHost::new(|payload| executed.push(payload))
            .with_parse_error(|report| eprintln!("  host error: {:?}: {}", report.error, report.message));
        let mut ctx = CardContext::new(Rc::clone(host_config), host);
        let tree = mount(&card, &mut ctx);

        println!("✓ {}", path.display());
        print_tree(&tree);
        print_inputs(&ctx);
        print_resources(&ctx);

        if submit {
            match first_submit(&tree) {
                Some(action) => {
                    ctx.execute_action(action)?;
                }
                None => println!("  no submit action"),
            }
        }
    }

    for payload in &executed {
        let json = serde_json::to_string_pretty(payload)?;
        println!("  submitted:");
        for line in json.lines() {
            println!("    {}", line);
        }
    }
    Ok(())
}

fn first_submit(tree: &RenderTree) -> Option<ActionPayload> {
    fn in_node(node: &RenderNode) -> Option<&ActionPayload> {
        node.actions
            .iter()
            .find(|a| is_submit(a))
            .or_else(|| node.children.iter().find_map(in_node))
    }

    tree.actions
        .iter()
        .find(|a| is_submit(a))
        .or_else(|| tree.body.iter().find_map(in_node))
        .cloned()
}

fn is_submit(action: &ActionPayload) -> bool {
    matches!(action.kind, ActionKind::Submit | ActionKind::Execute)
}

fn print_tree(tree: &RenderTree) {
    fn print_node(node: &RenderNode, depth: usize) {
        let indent = "  ".repeat(depth + 2);
        match node.id {
            Some(ref id) => println!("{}{} #{}", indent, node.element_type, id),
            None => println!("{}{}", indent, node.element_type),
        }
        for child in &node.children {
            print_node(child, depth + 1);
        }
    }

    println!("  elements:");
    for node in &tree.body {
        print_node(node, 0);
    }
    for action in &tree.actions {
        println!(
            "    [{}] {}",
            action.kind,
            action.title.as_deref().unwrap_or_default()
        );
    }
}

fn print_inputs(ctx: &CardContext<'_>) {
    let mut inputs: Vec<_> = ctx.inputs().get_all().iter().collect();
    if inputs.is_empty() {
        return;
    }
    inputs.sort_by(|a, b| a.0.cmp(b.0));
    println!("  inputs:");
    for (id, record) in inputs {
        let marker = if record.error_state { " (invalid)" } else { "" };
        println!("    {} = {:?}{}", id, record.value.to_string(), marker);
    }
}

fn print_resources(ctx: &CardContext<'_>) {
    let resources = ctx.resources().entries();
    if resources.is_empty() {
        return;
    }
    println!("  resources:");
    for entry in resources {
        if entry.mime_type.is_empty() {
            println!("    {}", entry.url);
        } else {
            println!("    {} ({})", entry.url, entry.mime_type);
        }
    }
}

fn print_error(error: &CardError) {
    match error {
        CardError::JsonError(msg) => {
            eprintln!("  JSON error:");
            eprintln!("    {}", msg);
        }
        CardError::MissingProperty { element, property } => {
            eprintln!(
                "  Missing required property '{}' for element '{}'",
                property, element
            );
        }
        CardError::InvalidProperty {
            element,
            property,
            reason,
        } => {
            eprintln!("  Invalid property '{}' for element '{}':", property, element);
            eprintln!("    {}", reason);
        }
        CardError::DuplicateId { id } => {
            eprintln!("  Duplicate input id '{}'", id);
            eprintln!("    Input ids must be unique within the card");
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
