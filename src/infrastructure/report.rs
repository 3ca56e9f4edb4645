// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lot::{LotRecord, ResultSet};
use crate::utils::errors::CrawlError;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// CSV 报告
///
/// 表头取自第一条记录的键顺序，除纯十进制数字外的字段一律加引号，缺失值写为空串。
pub struct CsvReporter;

impl CsvReporter {
    /// 写出结果集
    ///
    /// # 参数
    ///
    /// * `results` - 结果集
    /// * `out` - 输出目标
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 写出成功
    /// * `Err(CrawlError::EmptyResult)` - 结果集为空，无法确定表头
    pub fn write<W: Write>(results: &ResultSet, out: W) -> Result<(), CrawlError> {
        let first = results.first().ok_or(CrawlError::EmptyResult)?;

        // Fields arrive pre-quoted; the writer must not quote again
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .from_writer(out);

        writer.write_record(first.keys().into_iter().map(quote_field))?;
        for record in results {
            writer.write_record(
                record
                    .values()
                    .into_iter()
                    .map(|v| quote_field(v.unwrap_or(""))),
            )?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// 纯十进制数字（如 `3`、`125.00`）原样输出，其余内容加引号并转义内部引号
fn quote_field(value: &str) -> String {
    if is_plain_number(value) {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('"', "\"\""))
    }
}

fn is_plain_number(value: &str) -> bool {
    value.bytes().any(|b| b.is_ascii_digit())
        && value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && value.bytes().filter(|b| *b == b'.').count() <= 1
}

/// JSON 报告
///
/// 对象数组，键按字母排序，4 空格缩进，缺失值为 `null`。
pub struct JsonReporter;

impl JsonReporter {
    pub fn write<W: Write>(results: &ResultSet, out: W) -> Result<(), CrawlError> {
        let rows: Vec<_> = results.iter().map(LotRecord::to_sorted_map).collect();

        let mut serializer = Serializer::with_formatter(out, PrettyFormatter::with_indent(b"    "));
        rows.serialize(&mut serializer)?;
        serializer.into_inner().flush()?;

        Ok(())
    }

    /// 写入文件，已存在时覆盖
    pub fn write_file(results: &ResultSet, path: &Path) -> Result<(), CrawlError> {
        let file = File::create(path)?;
        Self::write(results, BufWriter::new(file))?;
        info!(path = %path.display(), records = results.len(), "JSON report written");
        Ok(())
    }

    /// 从文件读回结果集
    pub fn read_file(path: &Path) -> Result<ResultSet, CrawlError> {
        let file = File::open(path)?;
        let records: Vec<LotRecord> = serde_json::from_reader(BufReader::new(file))?;
        Ok(ResultSet::from(records))
    }
}
