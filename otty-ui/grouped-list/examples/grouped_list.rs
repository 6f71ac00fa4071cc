use std::time::{Duration, Instant};

use env_logger::Env;
use log::info;
use otty_ui_grouped_list::{
    ExpandOptions, ExpandState, ExpandableList, GroupProvider, GroupSpec,
    GroupingList, Item, ListObserver, Range,
};

struct Section {
    title: &'static str,
    id: i64,
    entries: &'static [&'static str],
}

impl GroupProvider<String, String> for Section {
    fn group(&self) -> String {
        self.title.to_owned()
    }

    fn sticky_id(&self) -> i64 {
        self.id
    }

    fn children(&self) -> Vec<String> {
        self.entries.iter().map(|entry| (*entry).to_owned()).collect()
    }
}

const SECTIONS: &[Section] = &[
    Section {
        title: "General",
        id: 1,
        entries: &["Terminal", "Theme"],
    },
    Section {
        title: "Profiles",
        id: 2,
        entries: &["Local", "SSH", "Docker"],
    },
    Section {
        title: "About",
        id: 3,
        entries: &[],
    },
];

/// Prints notifications the way a renderer would receive them.
struct Printer;

impl ListObserver for Printer {
    fn range_inserted(&mut self, range: Range) {
        info!("insert rows {}..{}", range.start, range.end());
    }

    fn range_removed(&mut self, range: Range) {
        info!("remove rows {}..{}", range.start, range.end());
    }

    fn dataset_changed(&mut self) {
        info!("refresh all rows");
    }
}

fn render(list: &GroupingList<String, String>) -> anyhow::Result<()> {
    for position in 0..list.visible_count() {
        match list.item_at(position)? {
            Item::Group { key } => {
                let marker = if list.is_expanded(key) { "[-]" } else { "[+]" };
                println!("{position:>2} {marker} {key}");
            },
            Item::Child { child, .. } => {
                println!("{position:>2}       {child}");
            },
        }
    }
    println!();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let list = GroupingList::from_providers(SECTIONS)?;
    let mut host = ExpandableList::new(list, ExpandOptions::default());
    let mut printer = Printer;
    let start = Instant::now();

    render(host.list())?;

    host.toggle(&String::from("General"), start, &mut printer);
    render(host.list())?;

    // Same group again inside the debounce window: ignored.
    let ignored = host.toggle(
        &String::from("General"),
        start + Duration::from_millis(100),
        &mut printer,
    );
    info!("second toggle handled: {}", ignored.is_some());

    host.toggle(
        &String::from("Profiles"),
        start + Duration::from_millis(150),
        &mut printer,
    );
    render(host.list())?;

    let payload = host.save().to_json()?;
    info!("saved expand state: {payload}");

    let specs: Vec<GroupSpec<String, String>> =
        SECTIONS.iter().rev().map(GroupSpec::from_provider).collect();
    host.set_items(specs, &mut printer)?;
    render(host.list())?;

    let state: ExpandState<String> = ExpandState::from_json(&payload)?;
    host.restore(&state, &mut printer);
    render(host.list())?;

    Ok(())
}
