//! Property tests: link commands reach the host in the order they were issued.

use folio_core::event::Event;
use folio_render::frame::Frame;
use folio_runtime::{Cmd, Model, ProgramSimulator};
use proptest::prelude::*;

struct Opener;

#[derive(Debug)]
enum OpenerMsg {
    Open(Vec<String>),
    Noop,
}

impl From<Event> for OpenerMsg {
    fn from(_: Event) -> Self {
        OpenerMsg::Noop
    }
}

impl Model for Opener {
    type Message = OpenerMsg;

    fn update(&mut self, msg: OpenerMsg) -> Cmd<OpenerMsg> {
        match msg {
            OpenerMsg::Open(uris) => Cmd::batch(uris.into_iter().map(Cmd::open_uri).collect()),
            OpenerMsg::Noop => Cmd::none(),
        }
    }

    fn view(&self, _frame: &mut Frame) {}
}

proptest! {
    #[test]
    fn opened_uris_keep_issue_order(batches in prop::collection::vec(
        prop::collection::vec("https://[a-z]{1,8}\\.dev/[a-z0-9]{0,6}", 0..4),
        0..6,
    )) {
        let mut sim = ProgramSimulator::new(Opener);
        sim.init();
        for batch in &batches {
            sim.send(OpenerMsg::Open(batch.clone()));
        }
        let expected: Vec<String> = batches.into_iter().flatten().collect();
        prop_assert_eq!(sim.opened_uris(), expected.as_slice());
    }
}
