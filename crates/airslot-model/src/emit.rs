//! LP 格式輸出
//!
//! 區段順序固定為 `maximize`、`subject to`、`binary`、`end`，
//! 項與約束完全依照模型中的順序輸出，不做排序或合併。

use rust_decimal::Decimal;
use std::fmt::{self, Write as _};
use std::io;
use std::path::Path;

use crate::model::{Model, Term};
use crate::variable::VarId;

/// 輸出選項
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// 在目標函數、制空約束與 binary 宣告後附加 `\ 艦名 搭載數 裝備名` 註解
    pub annotate: bool,
}

/// LP 檔寫出器
#[derive(Debug, Clone, Copy, Default)]
pub struct LpWriter {
    options: EmitOptions,
}

impl LpWriter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// 產生 LP 文字
    pub fn render(&self, model: &Model) -> String {
        let mut out = String::new();
        // 寫入 String 不會失敗
        let _ = self.render_into(model, &mut out);
        out
    }

    /// 寫出到任意輸出流（UTF-8，無 BOM）
    pub fn write_to<W: io::Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        out.write_all(self.render(model).as_bytes())
    }

    /// 寫出到檔案（覆寫）
    pub fn write_file(&self, model: &Model, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.render(model))
    }

    fn render_into(&self, model: &Model, out: &mut String) -> fmt::Result {
        writeln!(out, "maximize")?;
        for term in &model.objective {
            self.write_term(model, term, self.options.annotate, out)?;
        }
        writeln!(out)?;

        writeln!(out, "subject to")?;
        for (index, constraint) in model.constraints.iter().enumerate() {
            // 只有第一條（制空）約束附註解，與舊版輸出一致
            let annotate = self.options.annotate && index == 0;
            for term in &constraint.terms {
                self.write_term(model, term, annotate, out)?;
            }
            writeln!(out, "{} {}", constraint.sense.as_str(), fmt_rhs(constraint.rhs))?;
            writeln!(out)?;
        }

        writeln!(out, "binary")?;
        for id in &model.variables {
            write!(out, "{}", id)?;
            self.write_annotation(model, id, self.options.annotate, out)?;
            writeln!(out)?;
        }
        writeln!(out)?;

        writeln!(out, "end")
    }

    fn write_term(&self, model: &Model, term: &Term, annotate: bool, out: &mut String) -> fmt::Result {
        write!(out, "{} {}", fmt_coef(term.coefficient), term.variable)?;
        self.write_annotation(model, &term.variable, annotate, out)?;
        writeln!(out)
    }

    fn write_annotation(
        &self,
        model: &Model,
        id: &VarId,
        annotate: bool,
        out: &mut String,
    ) -> fmt::Result {
        if annotate {
            if let Some(label) = model.label(id) {
                write!(out, " \\ {}", label)?;
            }
        }
        Ok(())
    }
}

/// 係數一律帶正負號：`+12`、`-0.5`、`+0`
pub(crate) fn fmt_coef(value: Decimal) -> String {
    let value = value.normalize();
    if value.is_zero() {
        "+0".to_string()
    } else if value.is_sign_negative() {
        value.to_string()
    } else {
        format!("+{}", value)
    }
}

pub(crate) fn fmt_rhs(value: Decimal) -> String {
    let value = value.normalize();
    if value.is_zero() {
        "0".to_string()
    } else {
        value.to_string()
    }
}
