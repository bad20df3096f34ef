use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::board::Coord;
use crate::error::SolverError;
use crate::logging;
use crate::search::{CancelToken, Search, SearchConfig};

const DEFAULT_STEPS_PER_SLICE: u32 = 100_000;

fn to_js(err: SolverError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Plain JS objects and arrays rather than `Map`s.
fn export<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Forced-win search over one position, driven from JavaScript.
#[wasm_bindgen]
pub struct SantoriniSolver {
    search: Search,
    cancel: CancelToken,
}

#[wasm_bindgen]
impl SantoriniSolver {
    /// `position` is a 25-character compressed notation; `config` may be `undefined` or a
    /// partial object, missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        position: &str,
        max_depth: usize,
        config: JsValue,
    ) -> Result<SantoriniSolver, JsValue> {
        let cfg: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let cancel = CancelToken::new();
        let search = Search::from_notation(position, max_depth, cfg)
            .map_err(to_js)?
            .with_cancel_token(cancel.clone());
        Ok(Self { search, cancel })
    }

    #[wasm_bindgen(js_name = defaultConfig)]
    pub fn default_config() -> Result<JsValue, JsValue> {
        export(&SearchConfig::default())
    }

    /// One step. Resolves to `false` once the search has finished.
    pub fn advance(&mut self) -> Result<bool, JsValue> {
        self.search.advance().map_err(to_js)
    }

    /// Up to `steps` steps; returns how many were taken.
    #[wasm_bindgen(js_name = advanceSteps)]
    pub fn advance_steps(&mut self, steps: u32) -> Result<u32, JsValue> {
        let done = self.search.advance_steps(u64::from(steps)).map_err(to_js)?;
        Ok(done as u32)
    }

    /// Run to completion in slices of `steps_per_slice`, handing control back to the event
    /// loop between slices. Resolves to the root result.
    pub async fn run(&mut self, steps_per_slice: Option<u32>) -> Result<String, JsValue> {
        let slice = u64::from(steps_per_slice.unwrap_or(DEFAULT_STEPS_PER_SLICE).max(1));
        while !self.search.finished() {
            self.search.advance_steps(slice).map_err(to_js)?;
            let tick = js_sys::Promise::resolve(&JsValue::NULL);
            JsFuture::from(tick).await?;
        }
        self.result()
            .ok_or_else(|| to_js(SolverError::Unresolved { depth: 0 }))
    }

    /// Stop the search; the next step fails.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool {
        self.search.finished()
    }

    /// `"WIN"`, `"LOSE"` or `"UNDETERMINED"` once the root has been settled.
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> Option<String> {
        self.search.result().map(|outcome| outcome.to_string())
    }

    #[wasm_bindgen(js_name = completionRatio)]
    pub fn completion_ratio(&self) -> f64 {
        self.search.completion_ratio()
    }

    #[wasm_bindgen(js_name = totalGames)]
    pub fn total_games(&self) -> f64 {
        self.search.total_games() as f64
    }

    pub fn progress(&self) -> Result<JsValue, JsValue> {
        export(&self.search.progress())
    }

    /// Solution lines as `[{x, y}, ...]` per ply.
    pub fn leaves(&self) -> Result<JsValue, JsValue> {
        let lines: Vec<Vec<Vec<Coord>>> = self
            .search
            .leaves()
            .iter()
            .map(|leaf| leaf.history_coords())
            .collect();
        export(&lines)
    }

    #[wasm_bindgen(js_name = solutionTree)]
    pub fn solution_tree(&self) -> Result<JsValue, JsValue> {
        export(&self.search.solution_tree())
    }
}

/// Route `log` records to the browser console. `level` defaults to `"info"`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    logging::init(logging::parse_level(level.as_deref().unwrap_or("info")));
}
