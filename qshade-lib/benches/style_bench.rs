extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use qshade_lib::shade_resolve::shade_engine;
use qshade_lib::theme::DARK_LAUNCHER_QSS;
use qshade_lib::widget::widget_tree::{attach, WidgetNode, WidgetTree};

/// A launcher tree with many project cards, the shape a long-lived install
/// ends up with.
fn many_card_tree(cards: usize) -> WidgetTree {
    let tree = WidgetTree::new();
    let window = attach(&tree.root, WidgetNode::new("QMainWindow"));
    let scroll_area = attach(&window, WidgetNode::named("QScrollArea", "projectsScrollArea"));
    let container = attach(&scroll_area, WidgetNode::named("QWidget", "projectsContainer"));
    for _ in 0..cards {
        let card = attach(&container, WidgetNode::named("QFrame", "projectCard"));
        attach(&card, WidgetNode::named("QLabel", "projectName"));
        attach(&card, WidgetNode::named("QLabel", "projectInfo"));
        attach(&card, WidgetNode::named("QPushButton", "openButton"));
        attach(&card, WidgetNode::named("QPushButton", "deleteButton"));
    }
    tree
}

fn bench_many_cards(c: &mut Criterion) {
    let tree = many_card_tree(1_000);
    c.bench_function("many_cards", |b| {
        b.iter(|| shade_engine::apply(DARK_LAUNCHER_QSS, &tree).expect("theme parses"))
    });
}

fn bench_deep_nesting(c: &mut Criterion) {
    let tree = WidgetTree::new();
    let mut parent = attach(&tree.root, WidgetNode::new("QMainWindow"));
    for _ in 0..500 {
        parent = attach(&parent, WidgetNode::new("QWidget"));
    }
    attach(&parent, WidgetNode::new("QLineEdit"));

    c.bench_function("deep_nesting", |b| {
        b.iter(|| shade_engine::apply(DARK_LAUNCHER_QSS, &tree).expect("theme parses"))
    });
}

criterion_group!(benches, bench_many_cards, bench_deep_nesting);
criterion_main!(benches);
