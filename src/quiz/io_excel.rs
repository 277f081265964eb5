use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::quiz::{io_common::rows_to_responses, *};

/// Reads a spreadsheet laid out like the csv input: a header row with the
/// question ids, then one row per response.
pub fn read_excel_responses(
    path: &str,
    source: &ResponseSource,
) -> QuizResult<Vec<ParsedResponse>> {
    let wrange = get_range(path, source)?;

    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptyExcelSnafu { path })?;
    let header: Vec<String> = header_row
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => s.clone(),
            _ => String::new(),
        })
        .collect();
    debug!("read_excel_responses: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let mut cells: Vec<String> = Vec::new();
        for cell in row.iter() {
            cells.push(read_cell(cell, lineno)?);
        }
        rows.push(cells);
    }
    info!("read_excel_responses: {} rows in {:?}", rows.len(), path);
    Ok(rows_to_responses(path, &header, rows, source.id_column(), 2))
}

fn read_cell(cell: &DataType, lineno: usize) -> QuizResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok(String::new()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(path: &str, source: &ResponseSource) -> QuizResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &source.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = source.excel_worksheet_name.as_deref() {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: using worksheet {:?}", worksheet_name);
                Ok(wrange.clone())
            }
            _ => AmbiguousExcelWorksheetSnafu {
                path,
                names: all_worksheets
                    .iter()
                    .map(|(n, _)| n.clone())
                    .collect::<Vec<String>>(),
            }
            .fail(),
        }
    }
}
