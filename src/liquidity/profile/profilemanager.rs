use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::liquidity::component::componentspec::ComponentSpec;
use crate::liquidity::component::parametriccomponent::ParametricParameters;
use crate::liquidity::liquidityerror::LiquidityError;
use crate::liquidity::profile::profilerequest::LiquidityProfileRequest;
use crate::liquidity::rangesplitter::SideSpec;
use crate::manager::manager::ManagerBuilder;
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::math::grid::pricegrid::DEFAULT_POINTS;

// ─────────────────────────────────────────────────────────────────────────────
// 元件：先讀 component_type，再依型別讀取欄位
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub enum ComponentType {
    Flat,
    Linear,
    Quadratic,
    Gauss
}

#[derive(Deserialize)]
struct ComponentTypedObject {
    component_type: ComponentType
}

#[derive(Deserialize)]
struct FlatJsonProp {
    height: f64,
    range_start: f64,
    range_end: f64
}

#[derive(Deserialize)]
struct RangedJsonProp {
    coefficient: f64,
    range_start: f64,
    range_end: f64
}

#[derive(Deserialize)]
struct GaussJsonProp {
    height: f64,
    width: f64,
    center: f64
}

/// 欄位缺漏或型別錯誤視為元件參數錯誤。
fn parse_component_prop<T: DeserializeOwned>(component: &'static str, json_value: serde_json::Value) -> Result<T, ManagerError> {
    serde_json::from_value(json_value)
        .map_err(|error| LiquidityError::invalid_parameter(component, error.to_string()).into())
}

pub fn component_from_json(json_value: serde_json::Value) -> Result<ComponentSpec, ManagerError> {
    let typed_object: ComponentTypedObject = parse_json_value(json_value.clone())?;
    let component = match typed_object.component_type {
        ComponentType::Flat => {
            let prop: FlatJsonProp = parse_component_prop("flat", json_value)?;
            ComponentSpec::flat(prop.height, prop.range_start, prop.range_end)?
        },
        ComponentType::Linear => {
            let prop: RangedJsonProp = parse_component_prop("linear", json_value)?;
            ComponentSpec::linear(prop.coefficient, prop.range_start, prop.range_end)?
        },
        ComponentType::Quadratic => {
            let prop: RangedJsonProp = parse_component_prop("quadratic", json_value)?;
            ComponentSpec::quadratic(prop.coefficient, prop.range_start, prop.range_end)?
        },
        ComponentType::Gauss => {
            let prop: GaussJsonProp = parse_component_prop("gauss", json_value)?;
            ComponentSpec::gauss(prop.height, prop.width, prop.center)?
        }
    };
    Ok(component)
}

// ─────────────────────────────────────────────────────────────────────────────
// 單側
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub enum SideType {
    Components,
    Parametric
}

#[derive(Deserialize)]
struct SideTypedObject {
    side_type: SideType
}

#[derive(Deserialize)]
struct ComponentsJsonProp {
    components: Vec<serde_json::Value>
}

pub fn side_from_json(json_value: serde_json::Value) -> Result<SideSpec, ManagerError> {
    let typed_object: SideTypedObject = parse_json_value(json_value.clone())?;
    match typed_object.side_type {
        SideType::Components => {
            let prop: ComponentsJsonProp = parse_json_value(json_value)?;
            let components = prop.components
                .into_iter()
                .map(component_from_json)
                .collect::<Result<Vec<ComponentSpec>, ManagerError>>()?;
            Ok(SideSpec::components(components))
        },
        SideType::Parametric => {
            let params: ParametricParameters = parse_component_prop("parametric", json_value)?;
            params.validate()?;
            Ok(SideSpec::Parametric(params))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 完整請求
// ─────────────────────────────────────────────────────────────────────────────

fn default_points() -> usize {
    DEFAULT_POINTS
}

fn default_clamp_nonnegative() -> bool {
    true
}

#[derive(Deserialize)]
struct LiquidityProfileJsonProp {
    reference_price: f64,
    lower: f64,
    upper: f64,
    #[serde(default = "default_points")]
    points: usize,
    #[serde(default)]
    bin_count: Option<usize>,
    #[serde(default = "default_clamp_nonnegative")]
    clamp_nonnegative: bool,
    below: serde_json::Value,
    above: serde_json::Value
}

pub fn liquidity_profile_request_from_json(json_value: serde_json::Value) -> Result<Arc<LiquidityProfileRequest>, ManagerError> {
    let json_prop: LiquidityProfileJsonProp = parse_json_value(json_value)?;
    let below = side_from_json(json_prop.below)?;
    let above = side_from_json(json_prop.above)?;
    let request = LiquidityProfileRequest::new(json_prop.reference_price, json_prop.lower, json_prop.upper, below, above)
        .with_points(json_prop.points)
        .with_bin_count(json_prop.bin_count)
        .with_clamp_nonnegative(json_prop.clamp_nonnegative);
    request.validate()?;
    Ok(Arc::new(request))
}

pub struct ProfileManager {}

impl ProfileManager {
    pub fn new() -> ManagerBuilder<Arc<LiquidityProfileRequest>> {
        ManagerBuilder::new(liquidity_profile_request_from_json)
    }
}
