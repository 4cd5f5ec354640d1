//! Query：SQL 文本 + 绑定参数，或一次失败的构建。

use crate::value::SqlValue;
use std::collections::HashMap;

/// 占位符名到绑定值的映射。
pub type Params = HashMap<String, SqlValue>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("{operation} is not supported by {dialect}")]
    Unsupported {
        operation: &'static str,
        dialect: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Ready(String),
    Failed(BuildError),
}

/// 构建结果。处于失败状态时不会暴露任何 SQL 文本。
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    state: State,
    params: Params,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            state: State::Ready(sql.into()),
            params: Params::new(),
        }
    }

    pub fn failed(err: BuildError) -> Self {
        Self {
            state: State::Failed(err),
            params: Params::new(),
        }
    }

    /// 追加绑定参数（同名覆盖），返回自身以便链式调用。
    pub fn bind(mut self, params: impl IntoIterator<Item = (String, SqlValue)>) -> Self {
        self.params.extend(params);
        self
    }

    /// SQL 文本；构建失败时返回错误。
    pub fn sql(&self) -> Result<&str, &BuildError> {
        match &self.state {
            State::Ready(sql) => Ok(sql),
            State::Failed(err) => Err(err),
        }
    }

    /// 构建失败的原因。
    pub fn last_error(&self) -> Option<&BuildError> {
        match &self.state {
            State::Ready(_) => None,
            State::Failed(err) => Some(err),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// 拆成 `(sql, params)`。
    pub fn into_parts(self) -> Result<(String, Params), BuildError> {
        match self.state {
            State::Ready(sql) => Ok((sql, self.params)),
            State::Failed(err) => Err(err),
        }
    }
}

/// UNION 的一项：子查询及是否 `UNION ALL`。
#[derive(Debug, Clone, PartialEq)]
pub struct UnionInfo {
    pub all: bool,
    pub query: Query,
}

impl UnionInfo {
    pub fn new(all: bool, query: Query) -> Self {
        Self { all, query }
    }
}
