use clap::Parser;
use std::fs;

use qshade_lib::parser::widget_indices::WidgetIndices;
use qshade_lib::shade_resolve::shade_engine;
use qshade_lib::style::shade_style::{resolved_style_of, set_widget_state};
use qshade_lib::theme;
use qshade_lib::widget::widget_tree::Node;

const QSHADE_INTRO: &str = r#"
       ____  _____ __              __
      / __ \/ ___// /_  ____ _____/ /__
     / / / /\__ \/ __ \/ __ `/ __  / _ \
    / /_/ /___/ / / / / /_/ / /_/ /  __/
    \___\_\____/_/ /_/\__,_/\__,_/\___/

    QShade - resolve QSS themes against the launcher widget tree.
"#;

#[derive(Parser)]
#[command(name = "QShade")]
#[command(about = "Resolve a QSS stylesheet against the sample launcher tree")]
struct Args {
    /// Stylesheet path. Defaults to the built-in dark launcher theme.
    input: Option<String>,

    /// Report a single widget by object name instead of the whole tree.
    #[arg(long)]
    widget: Option<String>,

    /// Pseudo-states to set on the reported widget (hover, pressed, focus,
    /// disabled). Repeatable.
    #[arg(long)]
    state: Vec<String>,
}

fn main() {
    env_logger::init();
    println!("{}", QSHADE_INTRO);

    let args: Args = Args::parse();

    let qss_content = match &args.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading stylesheet: {}", e);
                std::process::exit(1);
            }
        },
        None => theme::DARK_LAUNCHER_QSS.to_string(),
    };

    let tree = theme::sample_launcher_tree();
    let rules = match shade_engine::apply(&qss_content, &tree) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error parsing stylesheet: {}", e);
            std::process::exit(1);
        }
    };

    let indices = WidgetIndices::build(&tree);

    match &args.widget {
        Some(name) => {
            let Some(handle) = indices.find_by_name(name) else {
                eprintln!("No widget named `{}` in the launcher tree.", name);
                std::process::exit(1);
            };
            for state in &args.state {
                set_widget_state(&handle, state, true, &rules);
            }
            print_widget(name, &handle);
        }
        None => {
            let mut names: Vec<&String> = indices.name_map.keys().collect();
            names.sort();
            for name in names {
                let handle = indices.name_map[name].clone();
                print_widget(name, &handle);
            }
        }
    }
}

fn print_widget(name: &str, handle: &std::rc::Rc<std::cell::RefCell<Node>>) {
    let class = match &*handle.borrow() {
        Node::Widget(widget) => widget.class.clone(),
        Node::Root(_) => return,
    };
    println!("{}#{}", class, name);
    let style = resolved_style_of(handle);
    let mut properties: Vec<(&String, &String)> = style.properties.iter().collect();
    properties.sort();
    for (property, value) in properties {
        println!("    {}: {};", property, value);
    }
    println!();
}
