//! QueryBuilder：按方言拼接 SELECT 的各个子句，并组合 UNION。

use crate::dialect::{Dialect, LimitSyntax};
use crate::query::{BuildError, Params, UnionInfo};
use crate::string_builder::StringBuilder;

const UNION_DISTINCT: &str = "UNION ";
const UNION_ALL: &str = "UNION ALL ";

/// 无法在没有 ORDER BY 时使用 OFFSET/FETCH 的方言所需的占位排序。
const ORDER_BY_NOTHING: &str = "ORDER BY (SELECT NULL)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBuilder {
    dialect: Dialect,
}

impl QueryBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// `SELECT [DISTINCT] [option] cols`，没有列时为 `*`。
    pub fn build_select(&self, cols: &[&str], distinct: bool, option: &str) -> String {
        let mut buf = StringBuilder::new();
        buf.write_leading(if distinct { "SELECT DISTINCT" } else { "SELECT" });
        buf.write_leading(option);
        if cols.is_empty() {
            buf.write_leading("*");
        } else {
            buf.write_leading(&self.quote_columns(cols).join(", "));
        }
        buf.into_string()
    }

    /// `FROM t1, t2`；没有表时为空串。
    pub fn build_from(&self, tables: &[&str]) -> String {
        if tables.is_empty() {
            return String::new();
        }
        let quoted: Vec<String> = tables
            .iter()
            .map(|t| self.dialect.quote_table_name(t))
            .collect();
        format!("FROM {}", quoted.join(", "))
    }

    /// `GROUP BY c1, c2`；没有列时为空串。
    pub fn build_group_by(&self, cols: &[&str]) -> String {
        if cols.is_empty() {
            return String::new();
        }
        format!("GROUP BY {}", self.quote_columns(cols).join(", "))
    }

    /// `ORDER BY c1, c2 DESC`；列名末尾的 `ASC`/`DESC` 保持在引号外。
    pub fn build_order_by(&self, cols: &[&str]) -> String {
        if cols.is_empty() {
            return String::new();
        }
        let items: Vec<String> = cols
            .iter()
            .map(|col| {
                let (name, dir) = split_direction(col);
                let mut s = self.dialect.quote_column_name(name);
                if let Some(dir) = dir {
                    s.push(' ');
                    s.push_str(dir);
                }
                s
            })
            .collect();
        format!("ORDER BY {}", items.join(", "))
    }

    /// 在 `sql` 后追加 ORDER BY 与分页子句。
    pub fn build_order_by_and_limit(
        &self,
        sql: &str,
        cols: &[&str],
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str(sql);
        let order_by = self.build_order_by(cols);

        match self.dialect.capabilities.limit {
            LimitSyntax::LimitOffset => {
                buf.write_leading(&order_by);
                // 大多数数据库要求 OFFSET 前有 LIMIT
                let limit = match (limit, offset) {
                    (None, Some(o)) if o > 0 => Some(i64::MAX as u64),
                    _ => limit,
                };
                if let Some(l) = limit {
                    buf.write_leading(&format!("LIMIT {l}"));
                }
                if let Some(o) = offset.filter(|o| *o > 0) {
                    buf.write_leading(&format!("OFFSET {o}"));
                }
            }
            LimitSyntax::OffsetFetch => {
                if limit.is_none() && offset.is_none() {
                    buf.write_leading(&order_by);
                    return buf.into_string();
                }
                if order_by.is_empty() {
                    buf.write_leading(ORDER_BY_NOTHING);
                } else {
                    buf.write_leading(&order_by);
                }
                buf.write_leading(&format!("OFFSET {} ROWS", offset.unwrap_or(0)));
                if let Some(l) = limit {
                    buf.write_leading(&format!("FETCH NEXT {l} ROWS ONLY"));
                }
            }
        }
        buf.into_string()
    }

    /// 把多个子查询组合成 UNION 子句，并把子查询的参数合并进 `params`。
    ///
    /// 顺序即输入顺序；同名参数后者覆盖前者。输入为空时返回空串且不修改 `params`。
    /// 任一子查询构建失败时返回该错误，同样不修改 `params`。
    pub fn build_union(
        &self,
        unions: &[UnionInfo],
        params: &mut Params,
    ) -> Result<String, BuildError> {
        let mut parts = Vec::with_capacity(unions.len());
        for u in unions {
            let sql = u.query.sql().map_err(Clone::clone)?;
            let opt = if u.all { UNION_ALL } else { UNION_DISTINCT };
            parts.push(format!("{opt}{sql}"));
        }

        for u in unions {
            params.extend(
                u.query
                    .params()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }

        let mut buf = StringBuilder::new();
        buf.write_strings(&parts, " ");
        Ok(buf.into_string())
    }

    /// 把 UNION 子句接在主查询后；`union` 为空时原样返回 `sql`。
    pub fn combine_union(&self, sql: &str, union: &str) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str(sql);
        if !union.is_empty() {
            if !buf.is_empty() {
                buf.write_str(" ");
            }
            buf.write_str(union);
        }
        buf.into_string()
    }

    fn quote_columns(&self, cols: &[&str]) -> Vec<String> {
        cols.iter()
            .map(|c| self.dialect.quote_column_name(c))
            .collect()
    }
}

fn split_direction(col: &str) -> (&str, Option<&'static str>) {
    let trimmed = col.trim_end();
    if let Some((name, dir)) = trimmed.rsplit_once(char::is_whitespace) {
        let name = name.trim_end();
        if !name.is_empty() {
            if dir.eq_ignore_ascii_case("ASC") {
                return (name, Some("ASC"));
            }
            if dir.eq_ignore_ascii_case("DESC") {
                return (name, Some("DESC"));
            }
        }
    }
    (col, None)
}
