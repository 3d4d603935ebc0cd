use crate::help::HelpDialog;
use crate::settings::{HelpPreference, Settings};
use crate::utils::*;
use bitflags::bitflags;
use clap::Args;
use gloo::timers::callback::Interval;
use lifesweeper_core as engine;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

/// How a single cell is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl From<engine::Cell> for ViewCellState {
    fn from(cell: engine::Cell) -> Self {
        match cell {
            engine::Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } => Self::Mine,
            engine::Cell {
                is_revealed: true,
                neighbor_mine_count,
                ..
            } => Self::Revealed(neighbor_mine_count),
            engine::Cell {
                is_flagged: true, ..
            } => Self::Flagged,
            _ => Self::Hidden,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT  = 1;
        const RIGHT = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    pos: engine::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

/// What a completed click on a cell asks the engine to do.
#[derive(Copy, Clone, Debug, PartialEq)]
enum CellAction {
    Reveal(engine::Coord2),
    Flag(engine::Coord2),
}

/// Tracks the buttons held over a cell and turns a release into an action.
///
/// Returns whether the view needs a redraw, plus the action to apply, if any.
fn track_pointer(current: &mut Option<CellPointerState>, msg: CellMsg) -> (bool, Option<CellAction>) {
    match msg {
        CellMsg::Leave => (current.take().is_some(), None),
        CellMsg::Update(cell_state) if cell_state.buttons.is_empty() => {
            // all buttons were released, act on what was held before
            match current.take() {
                None => (false, None),
                Some(CellPointerState { pos, buttons }) => match buttons {
                    MouseButtons::LEFT => (true, Some(CellAction::Reveal(pos))),
                    MouseButtons::RIGHT => (true, Some(CellAction::Flag(pos))),
                    _ => (true, None),
                },
            }
        }
        CellMsg::Update(cell_state) => match current.replace(cell_state) {
            None => (true, None),
            Some(CellPointerState { pos, buttons }) => (
                pos != cell_state.pos
                    || (buttons & MouseButtons::LEFT) != (cell_state.buttons & MouseButtons::LEFT),
                None,
            ),
        },
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Step,
    NewGame,
    ToggleHelp,
    SuppressHelp(bool),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: engine::Coord,
    y: engine::Coord,
    cell_state: ViewCellState,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        x,
        y,
        cell_state,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            Hidden => classes!(),
            Flagged => classes!("flag"),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Mine => classes!("open", "mine", "oops"),
        }
    );
    if pressed {
        class.push("open");
    }

    let on_pointer = |event_name: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (x, y),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) mouse {} ({:?})", x, y, event_name, buttons);
        })
    };
    let onmousedown = on_pointer("down");
    let onmouseup = on_pointer("up");
    let onmouseenter = on_pointer("enter");

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Leave);
            log::trace!("({}, {}) mouse leave", x, y);
        })
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Grid width, in cells
    #[arg(long)]
    pub(crate) width: Option<engine::Coord>,

    /// Grid height, in cells
    #[arg(long)]
    pub(crate) height: Option<engine::Coord>,

    /// Chance for each cell to hold a mine, between 0 and 1
    #[arg(long)]
    pub(crate) mine_probability: Option<f64>,

    /// Milliseconds between two generations
    #[arg(long)]
    pub(crate) step_interval: Option<u32>,
}

fn new_engine(settings: &Settings, seed: u64) -> engine::GridEngine {
    log::debug!("new grid, seed: {}", seed);
    engine::GridEngine::initialize(
        settings.grid,
        engine::BernoulliMineGenerator::from_seed(seed),
    )
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: Settings,
    engine: engine::GridEngine,
    help: HelpPreference,
    help_open: bool,
    current_cell_state: Option<CellPointerState>,
    _step_interval: Interval,
}

impl GameView {
    fn create_scheduler(ctx: &Context<Self>, millis: u32) -> Interval {
        let link = ctx.link().clone();
        Interval::new(millis, move || link.send_message(Msg::Step))
    }

    fn cell_state_at(&self, (x, y): engine::Coord2) -> ViewCellState {
        self.engine
            .cell_at(x.into(), y.into())
            .map_or(ViewCellState::Hidden, ViewCellState::from)
    }

    fn reveal_cell(&mut self, (x, y): engine::Coord2) -> bool {
        self.engine.reveal(x.into(), y.into()).has_update()
    }

    fn mark_cell(&mut self, (x, y): engine::Coord2) -> bool {
        self.engine.toggle_flag(x.into(), y.into()).has_update()
    }

    fn is_pressed(&self, coords: engine::Coord2, cell_state: ViewCellState) -> bool {
        matches!(
            (self.current_cell_state, cell_state),
            (
                Some(CellPointerState {
                    pos,
                    buttons: MouseButtons::LEFT,
                }),
                ViewCellState::Hidden,
            ) if pos == coords
        )
    }

    fn handle_cell_event(&mut self, msg: CellMsg) -> bool {
        let (redraw, action) = track_pointer(&mut self.current_cell_state, msg);
        match action {
            Some(CellAction::Reveal(pos)) => {
                log::debug!("reveal cell: {:?}", pos);
                self.reveal_cell(pos);
            }
            Some(CellAction::Flag(pos)) => {
                log::debug!("flag cell: {:?}", pos);
                self.mark_cell(pos);
            }
            None => log::trace!("cell event: {:?}", msg),
        }
        redraw
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = Settings::from_props(ctx.props());
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let help: HelpPreference = LocalOrDefault::local_or_default();

        Self {
            engine: new_engine(&settings, seed),
            help,
            help_open: !help.suppressed,
            current_cell_state: None,
            _step_interval: GameView::create_scheduler(ctx, settings.step_interval_ms),
            settings,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CellEvent(cell_msg) => self.handle_cell_event(cell_msg),
            Step => self.engine.step().has_update(),
            NewGame => {
                self.engine = new_engine(&self.settings, js_random_seed());
                true
            }
            ToggleHelp => {
                self.help_open = !self.help_open;
                true
            }
            SuppressHelp(suppressed) => {
                self.help = HelpPreference::apply(suppressed);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (cols, rows) = self.engine.size();
        let generation = format_for_counter(self.engine.generation());
        let revealed = format_for_counter(self.engine.revealed_count().into());

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_toggle_help = ctx.link().callback(|_: MouseEvent| ToggleHelp);
        let cb_close_help = ctx.link().callback(|_: ()| ToggleHelp);
        let cb_suppress_help = ctx.link().callback(SuppressHelp);

        html! {
            <div class="lifesweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <small onclick={cb_toggle_help}>{"?"}</small>
                <nav>
                    <aside>{revealed}</aside>
                    <span><button class="in-progress" onclick={cb_new_game}/></span>
                    <aside>{generation}</aside>
                </nav>
                <table class="playable">
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let cell_state = self.cell_state_at((x, y));
                                        let pressed = self.is_pressed((x, y), cell_state);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {x} {y} {cell_state} {callback} {pressed}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <HelpDialog
                    open={self.help_open}
                    suppressed={self.help.suppressed}
                    on_close={cb_close_help}
                    on_suppress={cb_suppress_help}
                />
            </div>
        }
    }
}
