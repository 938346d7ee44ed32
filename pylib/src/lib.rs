use pyo3::{
    create_exception, exceptions::PyException, prelude::*, types::PyDict, wrap_pyfunction, PyErr,
};
use scan_tiler::{crop_page, load_page, scan_grid, tile_page, Bounds, PageTiles, TilerParams};

create_exception!(pyscan_tiler, ScanTilerException, PyException);

fn as_tuple(b: &Bounds) -> (u32, u32, u32, u32) {
    (b.left, b.right, b.top, b.bottom)
}

fn process_result(res: &PageTiles, py: Python) -> PyResult<PyObject> {
    let boxes: Vec<_> = res.tiles.iter().map(|t| as_tuple(&t.bounds)).collect();
    let cells: Vec<_> = res.tiles.iter().map(|t| as_tuple(&t.cell)).collect();
    let dict = PyDict::new(py);
    dict.set_item("columns", res.grid.columns.clone())?;
    dict.set_item("rows", res.grid.rows.clone())?;
    dict.set_item("cells", cells)?;
    dict.set_item("boxes", boxes)?;
    dict.set_item("tile_count", res.tiles.len())?;
    dict.set_item("page_size", res.page.dimensions())?;
    Ok(dict.into())
}

fn params(resolution: u32) -> Result<TilerParams, ScanTilerError> {
    Ok(TilerParams::new(resolution)?)
}

#[pyfunction]
fn tile_page_from_file(path: String, resolution: u32, py: Python) -> PyResult<PyObject> {
    let params = params(resolution)?;
    let scan = load_page(&path).map_err(ScanTilerError::from)?;
    let res = tile_page(&scan, &params).map_err(ScanTilerError::from)?;
    process_result(&res, py)
}

#[pyfunction]
fn scan_grid_from_file(path: String, resolution: u32) -> PyResult<(Vec<u32>, Vec<u32>)> {
    let params = params(resolution)?;
    let scan = load_page(&path).map_err(ScanTilerError::from)?;
    let page = crop_page(&scan, params.margin).map_err(ScanTilerError::from)?;
    let grid = scan_grid(&page, &params.scan_params());
    Ok((grid.columns, grid.rows))
}

/// Wrapper around scan_tiler::Error so we convert to PyErr
struct ScanTilerError(scan_tiler::Error);

impl From<scan_tiler::Error> for ScanTilerError {
    fn from(err: scan_tiler::Error) -> ScanTilerError {
        ScanTilerError(err)
    }
}

impl From<ScanTilerError> for PyErr {
    fn from(err: ScanTilerError) -> PyErr {
        PyErr::new::<ScanTilerException, String>(err.0.to_string())
    }
}

#[pymodule]
fn pyscan_tiler(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tile_page_from_file, m)?)?;
    m.add_function(wrap_pyfunction!(scan_grid_from_file, m)?)?;
    Ok(())
}
