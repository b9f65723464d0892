use crate::core::{Currency, SwapError, SwapResult, Token};
use crate::pools::{LiquidityPool, PoolQuery};
use crate::routing::Route;
use log::trace;

/// Splits `pools` into maximal runs sharing one pricing model, in order.
pub fn partition_by_protocol(pools: &[LiquidityPool]) -> Vec<&[LiquidityPool]> {
    let mut sections = Vec::new();
    let mut start = 0;
    for (index, pool) in pools.iter().enumerate().skip(1) {
        if !pool.same_variant(&pools[start]) {
            sections.push(&pools[start..index]);
            start = index;
        }
    }
    if start < pools.len() {
        sections.push(&pools[start..]);
    }
    sections
}

/// Token reached by walking `pools` from `input`.
pub fn output_of_pools(pools: &[LiquidityPool], input: &Token) -> SwapResult<Token> {
    let mut current = input.clone();
    for (hop, pool) in pools.iter().enumerate() {
        current = pool
            .other_token(&current)
            .ok_or_else(|| SwapError::DiscontinuousPath {
                hop,
                token: current.to_string(),
            })?
            .clone();
    }
    Ok(current)
}

/// Breaks a route into same-model sub-routes.
///
/// Each sub-route starts where the previous one ended; the first starts at
/// the wrapped route input, so every segment is token-to-token.
pub fn segment_route(route: &Route) -> SwapResult<Vec<Route>> {
    let mut input = route.input().wrapped().clone();
    let mut segments = Vec::new();
    for section in partition_by_protocol(route.pools()) {
        let output = output_of_pools(section, &input)?;
        trace!(
            "segment {} pools {} -> {} ({})",
            section.len(),
            input,
            output,
            section[0].protocol()
        );
        let segment = Route::new(
            section.to_vec(),
            Currency::Token(input),
            Currency::Token(output.clone()),
        )?;
        segments.push(segment);
        input = output;
    }
    Ok(segments)
}
