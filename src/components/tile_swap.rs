use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, HtmlInputElement,
    HtmlSelectElement, Url,
};
use yew::prelude::*;

use super::submit::submit_completion;
use super::GameProps;
use crate::model::{ClickOutcome, GridSize, TileSwapPuzzle};

/// Side of the square working canvas the source image is cover-cropped onto.
const BASE_SIZE: f64 = 600.0;

pub enum Msg {
    FileChosen(Option<web_sys::File>),
    GridChosen(GridSize),
    ImageReady,
    ImageFailed,
    Shuffle,
    Tile(usize),
}

/// Swap-to-solve picture puzzle over a user-chosen image. Changing the image
/// or the grid discards the round and cuts the picture again.
pub struct TileSwapComp {
    grid: GridSize,
    image: Option<HtmlImageElement>,
    object_url: Option<String>,
    puzzle: Option<TileSwapPuzzle<String>>,
    /// Keep the load callbacks alive until the image settles.
    _onload: Option<Closure<dyn FnMut()>>,
    _onerror: Option<Closure<dyn FnMut()>>,
}

impl Component for TileSwapComp {
    type Message = Msg;
    type Properties = GameProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            grid: GridSize::Three,
            image: None,
            object_url: None,
            puzzle: None,
            _onload: None,
            _onerror: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(Some(file)) => {
                self.begin_image_load(ctx, &file);
                true
            }
            Msg::FileChosen(None) => false,
            Msg::GridChosen(grid) => {
                self.grid = grid;
                self.rebuild(ctx);
                true
            }
            Msg::ImageReady => {
                if let Some(url) = self.object_url.take() {
                    let _ = Url::revoke_object_url(&url);
                }
                self.rebuild(ctx);
                true
            }
            Msg::ImageFailed => {
                log::error!("could not load the chosen image");
                self.image = None;
                self.puzzle = None;
                true
            }
            Msg::Shuffle => match self.puzzle.as_mut() {
                Some(puzzle) => {
                    puzzle.reshuffle();
                    true
                }
                None => {
                    self.rebuild(ctx);
                    true
                }
            },
            Msg::Tile(pos) => {
                let Some(puzzle) = self.puzzle.as_mut() else {
                    return false;
                };
                match puzzle.click(pos) {
                    ClickOutcome::Ignored => false,
                    ClickOutcome::Selected(_) | ClickOutcome::Deselected => true,
                    ClickOutcome::Swapped { solved } => {
                        if solved {
                            self.report_completion(ctx);
                        }
                        true
                    }
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_file = ctx.link().callback(|event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            Msg::FileChosen(input.files().and_then(|files| files.get(0)))
        });
        let on_grid = ctx.link().callback(|event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let side = select.value().parse::<usize>().unwrap_or(3);
            Msg::GridChosen(GridSize::try_from(side).unwrap_or(GridSize::Three))
        });

        let stats = self.puzzle.as_ref().map(|puzzle| {
            format!(
                "Moves: {} · Correct: {}/{}",
                puzzle.moves(),
                puzzle.correct_count(),
                puzzle.grid().cells()
            )
        });

        html! {
            <div class="cognitiva-rompecabezas">
                <div class="cognitiva-rompecabezas__toolbar">
                    <input type="file" accept="image/*" onchange={on_file} />
                    <label>
                        {"Grid: "}
                        <select onchange={on_grid}>
                            { for GridSize::ALL.iter().map(|grid| {
                                let side = grid.side();
                                html! {
                                    <option
                                        key={side}
                                        value={side.to_string()}
                                        selected={*grid == self.grid}
                                    >
                                        {format!("{side} × {side}")}
                                    </option>
                                }
                            }) }
                        </select>
                    </label>
                    <button
                        onclick={ctx.link().callback(|_| Msg::Shuffle)}
                        disabled={self.image.is_none()}
                    >
                        {"Shuffle"}
                    </button>
                    if let Some(stats) = stats {
                        <span class="cognitiva-rompecabezas__stats">{stats}</span>
                    }
                </div>
                { self.view_grid(ctx) }
                if self.puzzle.as_ref().is_some_and(|puzzle| puzzle.is_solved()) {
                    <div class="cognitiva-rompecabezas__overlay">
                        <h3>{"Completed!"}</h3>
                        <p>{format!("You earned {} points.", 5 * self.grid.cells())}</p>
                        <button onclick={ctx.link().callback(|_| Msg::Shuffle)}>
                            {"Play again"}
                        </button>
                    </div>
                }
            </div>
        }
    }
}

impl TileSwapComp {
    fn begin_image_load(&mut self, ctx: &Context<Self>, file: &web_sys::File) {
        self.puzzle = None;
        self.image = None;
        let Ok(url) = Url::create_object_url_with_blob(file) else {
            log::error!("could not create an object URL for the chosen file");
            return;
        };
        let Ok(image) = HtmlImageElement::new() else {
            log::error!("could not create an image element");
            return;
        };

        let link = ctx.link().clone();
        let onload = Closure::wrap(Box::new(move || {
            link.send_message(Msg::ImageReady);
        }) as Box<dyn FnMut()>);
        image.set_onload(Some(onload.as_ref().unchecked_ref()));

        let link = ctx.link().clone();
        let onerror = Closure::wrap(Box::new(move || {
            link.send_message(Msg::ImageFailed);
        }) as Box<dyn FnMut()>);
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        image.set_src(&url);
        self.object_url = Some(url);
        self.image = Some(image);
        self._onload = Some(onload);
        self._onerror = Some(onerror);
    }

    /// Cut the loaded image for the current grid and start a fresh round.
    fn rebuild(&mut self, ctx: &Context<Self>) {
        self.puzzle = None;
        let Some(image) = &self.image else {
            return;
        };
        match partition_image(image, self.grid) {
            Ok(fragments) => {
                match TileSwapPuzzle::new(ctx.props().activity_id, self.grid, fragments) {
                    Ok(puzzle) => self.puzzle = Some(puzzle),
                    Err(err) => log::error!("failed to build the puzzle: {err}"),
                }
            }
            Err(err) => log::error!("failed to cut the image: {err:?}"),
        }
    }

    fn report_completion(&mut self, ctx: &Context<Self>) {
        if let Some(record) = self.puzzle.as_mut().and_then(|p| p.take_completion()) {
            submit_completion(ctx.props().session.clone(), record);
        }
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let Some(puzzle) = &self.puzzle else {
            return html! {
                <p class="cognitiva-rompecabezas__hint">
                    {"Choose an image to start."}
                </p>
            };
        };
        let side = puzzle.grid().side();
        let style = format!("grid-template-columns: repeat({side}, 1fr); max-width: 600px;");
        let tiles = (0..puzzle.grid().cells()).map(|pos| {
            let tile = puzzle.tile_at(pos);
            let onclick = ctx.link().callback(move |_| Msg::Tile(pos));
            let class = classes!(
                "cognitiva-rompecabezas__tile",
                (puzzle.selected() == Some(pos))
                    .then_some("cognitiva-rompecabezas__tile--selected"),
                (tile.home == pos).then_some("cognitiva-rompecabezas__tile--correct"),
            );
            html! {
                <button key={pos} {class} {onclick}>
                    <img src={tile.fragment.clone()} draggable="false" />
                </button>
            }
        });
        html! {
            <div class="cognitiva-rompecabezas__grid" {style}>
                { for tiles }
            </div>
        }
    }
}

/// Cover-crop `image` onto a square canvas and cut it into `grid` fragments,
/// each a JPEG data URL tagged by position order (row-major).
fn partition_image(image: &HtmlImageElement, grid: GridSize) -> Result<Vec<String>, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let base: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    base.set_width(BASE_SIZE as u32);
    base.set_height(BASE_SIZE as u32);
    let base_ctx: CanvasRenderingContext2d = base
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    base_ctx.set_fill_style_str("#000");
    base_ctx.fill_rect(0.0, 0.0, BASE_SIZE, BASE_SIZE);
    cover_draw(&base_ctx, image, BASE_SIZE)?;

    let side = grid.side();
    let tile_size = BASE_SIZE / side as f64;
    let mut fragments = Vec::with_capacity(grid.cells());
    for row in 0..side {
        for col in 0..side {
            let cut: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
            cut.set_width(tile_size as u32);
            cut.set_height(tile_size as u32);
            let cut_ctx: CanvasRenderingContext2d = cut
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("no 2d context"))?
                .dyn_into()?;
            cut_ctx.draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &base,
                col as f64 * tile_size,
                row as f64 * tile_size,
                tile_size,
                tile_size,
                0.0,
                0.0,
                tile_size,
                tile_size,
            )?;
            fragments.push(cut.to_data_url_with_type("image/jpeg")?);
        }
    }
    Ok(fragments)
}

/// Scale to fill the square, centering the overflow, like CSS `object-fit:
/// cover`.
fn cover_draw(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    size: f64,
) -> Result<(), JsValue> {
    let width = image.natural_width() as f64;
    let height = image.natural_height() as f64;
    if width <= 0.0 || height <= 0.0 {
        return Ok(());
    }
    let scale = (size / width).max(size / height);
    let scaled_width = width * scale;
    let scaled_height = height * scale;
    let dx = (size - scaled_width) / 2.0;
    let dy = (size - scaled_height) / 2.0;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, dx, dy, scaled_width, scaled_height)
}
