// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two anchors in a vertical scroll view: "Scroll down" and "Scroll up".
//!
//! The host here is a toy: views are stacked boxes with fixed heights, the
//! scroll view records its offset, and frames run when the loop drains them.
//!
//! Run:
//! - `cargo run -p understory_demos --example anchor_scroll`
//! - `RUST_LOG=understory_anchor=trace cargo run -p understory_demos --example anchor_scroll`

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_anchor::{
    Anchor, AnchorContainer, AnchorHost, Axis, FrameCallback, MeasureCallback, PointScroll,
    ScrollContainer, ScrollPoint, Target,
};

/// Box height plus vertical margins, as in a column of 300px boxes.
const ROW: f64 = 340.0;

#[derive(Debug, Default)]
struct ScrollView {
    offset: Cell<f64>,
}

impl PointScroll for ScrollView {
    fn scroll_to(&self, point: ScrollPoint) {
        if let Some(y) = point.y {
            println!(
                "  scroll view: {} -> {y}{}",
                self.offset.get(),
                if point.animated { " (animated)" } else { "" }
            );
            self.offset.set(y);
        }
    }
}

impl ScrollContainer for ScrollView {
    fn as_point_scroll(&self) -> Option<&dyn PointScroll> {
        Some(self)
    }
}

/// Views are identified by their row in the column.
#[derive(Default)]
struct Column {
    tasks: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl Column {
    fn run(&self) {
        loop {
            let Some(task) = self.tasks.borrow_mut().pop_front() else {
                break;
            };
            task();
        }
    }
}

impl AnchorHost for Column {
    type Target = usize;
    type Container = Rc<ScrollView>;
    type Node = ();

    fn find_node(&self, _container: &Rc<ScrollView>) -> Option<()> {
        Some(())
    }

    fn measure_layout(&self, row: &usize, _relative_to: &(), callback: MeasureCallback) {
        let top = *row as f64 * ROW + 20.0;
        self.tasks
            .borrow_mut()
            .push_back(Box::new(move || callback(Some(Point::new(0.0, top)))));
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.tasks.borrow_mut().push_back(callback);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = Rc::new(Column::default());
    let view = AnchorContainer::scroll_view(host.clone(), Axis::Vertical);
    let native = Rc::new(ScrollView::default());
    view.attach(Some(native.clone()));

    // box, "top", box, "bottom", box, box
    let top = Target::new(view.scope(), "top");
    top.attach(1);
    let bottom = Target::new(view.scope(), "bottom");
    bottom.attach(3);

    let report = |label: &'static str| {
        move |outcome: understory_anchor::ScrollOutcome| match outcome {
            Ok(()) => println!("  {label}: ok"),
            Err(err) => println!("  {label}: {err}"),
        }
    };
    let mut scroll_down = Anchor::new(view.scope(), "bottom")
        .on_press(|_: &()| println!("press: Scroll down"))
        .on_request_scroll_to(report("scroll down"));
    let mut scroll_up = Anchor::new(view.scope(), "top")
        .on_press(|_: &()| println!("press: Scroll up"))
        .on_request_scroll_to(report("scroll up"));
    let mut nowhere: Anchor<Column> =
        Anchor::new(view.scope(), "middle").on_request_scroll_to(report("scroll to middle"));

    let _ = scroll_down.press(&());
    host.run();
    let _ = scroll_up.press(&());
    host.run();
    println!("press: Scroll to middle");
    let _ = nowhere.press(&());
    host.run();

    println!("final offset: {}", native.offset.get());
}
