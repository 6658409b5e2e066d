use sea_orm::{
    ColumnTrait, Condition, IntoSimpleExpr,
    sea_query::{Expr, Func, LikeExpr},
};

const LIKE_ESCAPE: char = '!';

/// Case-insensitive substring match of `term` against any of `columns`.
///
/// Produces `LOWER(col) LIKE '%term%' ESCAPE '!' OR ...`, with `%`, `_` and `!`
/// in `term` matched literally. An empty column list yields an empty
/// `Condition::any()`, which matches nothing.
pub fn search_any<C>(columns: &[C], term: &str) -> Condition
where
    C: ColumnTrait,
{
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(
            Expr::expr(Func::lower(col.into_simple_expr()))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
        )
    })
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
