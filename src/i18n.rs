use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Display language
// ---------------------------------------------------------------------------

/// Language of every user-visible text. Owned by the UI state and passed to
/// each render function; nothing reads it from a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Chinese];

    /// Label shown in the language menu (always in its own language).
    pub fn menu_label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }

    /// Whether rendering needs a font with CJK glyphs.
    pub fn needs_cjk_font(self) -> bool {
        matches!(self, Language::Chinese)
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Chinese => &ZH,
        }
    }
}

// ---------------------------------------------------------------------------
// String tables
// ---------------------------------------------------------------------------

/// Static UI text for one language.
#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub language_menu: &'static str,
    pub tab_home: &'static str,
    pub tab_individual: &'static str,
    pub tab_batch: &'static str,
    pub predict_button: &'static str,
    pub result_prefix: &'static str,
    pub batch_title: &'static str,
    pub select_file: &'static str,
    pub browse: &'static str,
    pub batch_button: &'static str,
    pub status_selected: &'static str,
    pub status_start: &'static str,
    pub status_reading: &'static str,
    pub status_validating: &'static str,
    pub status_scaling: &'static str,
    pub status_predicting: &'static str,
    pub status_saving: &'static str,
    pub status_completed: &'static str,
    pub status_cancelled: &'static str,
    pub success_save: &'static str,
    pub warning_no_file: &'static str,
    pub warning_no_file_msg: &'static str,
    pub error_input: &'static str,
    pub error_occurred: &'static str,
    pub unexpected_error: &'static str,
    pub success: &'static str,
    pub error_title: &'static str,
    pub open_title: &'static str,
    pub save_title: &'static str,
    pub spreadsheet_filter: &'static str,
    pub preview_title: &'static str,
    pub row_axis: &'static str,
    pub out_of_range_rows: &'static str,
    pub experiment_diagram_desc: &'static str,
    pub dt_model_structure_desc: &'static str,
    pub instructions: &'static str,
}

static EN: Strings = Strings {
    title: "FRP-Concrete Bond Strength Prediction",
    language_menu: "Language",
    tab_home: "Home",
    tab_individual: "Individual Prediction",
    tab_batch: "Batch Prediction",
    predict_button: "Predict",
    result_prefix: "Predicted τu: ",
    batch_title: "Batch Prediction",
    select_file: "Selected Excel File:",
    browse: "Browse",
    batch_button: "Run Batch Prediction",
    status_selected: "File selected. Ready to start batch prediction.",
    status_start: "Starting batch prediction...",
    status_reading: "Reading file...",
    status_validating: "Checking feature columns...",
    status_scaling: "Scaling input data...",
    status_predicting: "Performing prediction...",
    status_saving: "Saving prediction results...",
    status_completed: "Batch prediction completed.",
    status_cancelled: "Save operation cancelled.",
    success_save: "Batch prediction completed. Results saved to ",
    warning_no_file: "No file selected",
    warning_no_file_msg: "Please select an Excel file for batch prediction.",
    error_input: "Input Error: Please ensure all fields contain valid numbers.",
    error_occurred: "An error occurred:",
    unexpected_error: "An unexpected error occurred. Details were written to the log file.",
    success: "Success",
    error_title: "Error",
    open_title: "Open Excel File",
    save_title: "Save Excel File",
    spreadsheet_filter: "Excel Files",
    preview_title: "Predicted τu per row",
    row_axis: "Row",
    out_of_range_rows: "rows with categorical codes outside their enumeration",
    experiment_diagram_desc: "Figure 1: Experimental Setup Schematic",
    dt_model_structure_desc: "Figure 2: Decision Tree Model Structure",
    instructions: "\
Inputs:
1. T (Temperature): Temperature in °C.
2. FM (Failure Mode): Mode of failure.
   - 1: FRP-sand layer debonding
   - 2: FRP bar pullout
   - 3: Concrete shear failure
   - 4: FRP bar rupture
   - 5: Concrete splitting
3. FT (FRP Type): Type of FRP.
   - 1: GFRP
   - 2: CFRP
   - 3: BFRP
4. BS (FRP Bar Surface): Surface form of FRP bar.
   - 1: Sand-coated
   - 2: Fiber-wrapped sand-coated
   - 3: Ribbed
   - 4: Fiber-wrapped
   - 5: Sand-coated ribbed
5. d (FRP Bar Diameter): Diameter of FRP bar in mm.
6. la (Anchorage Length): Anchorage length in mm.
7. fc (Concrete Compressive Strength): Compressive strength of concrete in MPa.
8. c/d (Concrete Cover / Bar Diameter): Normalized concrete cover thickness.

Output:
- τu (Interface Bond Strength): Interface bond strength in MPa.

Batch Prediction Instructions:
- Ensure that the Excel file has at least 8 columns corresponding to the input features in the following order:
  T, FM, FT, BS, d, la, fc, c/d
- The file must not contain a header row.
- Discrete features (FM, FT, BS) should be encoded as specified above.
- All feature columns must contain valid numerical values.
",
};

static ZH: Strings = Strings {
    title: "FRP-混凝土粘结强度预测",
    language_menu: "语言",
    tab_home: "主页",
    tab_individual: "单个预测",
    tab_batch: "批量预测",
    predict_button: "预测",
    result_prefix: "预测 τu: ",
    batch_title: "批量预测",
    select_file: "选择的Excel文件:",
    browse: "浏览",
    batch_button: "运行批量预测",
    status_selected: "文件已选择。准备开始批量预测。",
    status_start: "开始批量预测...",
    status_reading: "正在读取文件...",
    status_validating: "正在检查特征列...",
    status_scaling: "正在缩放输入数据...",
    status_predicting: "正在进行预测...",
    status_saving: "正在保存预测结果...",
    status_completed: "批量预测完成。",
    status_cancelled: "保存操作已取消。",
    success_save: "批量预测完成，结果已保存到 ",
    warning_no_file: "未选择文件",
    warning_no_file_msg: "请选择一个Excel文件进行批量预测。",
    error_input: "输入错误: 请确保所有字段包含有效数字。",
    error_occurred: "发生错误:",
    unexpected_error: "发生意外错误，详细信息已写入日志文件。",
    success: "成功",
    error_title: "错误",
    open_title: "浏览",
    save_title: "保存Excel文件",
    spreadsheet_filter: "Excel文件",
    preview_title: "各行预测 τu",
    row_axis: "行",
    out_of_range_rows: "行的离散特征编码超出定义范围",
    experiment_diagram_desc: "图1: 实验设置示意图",
    dt_model_structure_desc: "图2: 决策树模型结构图",
    instructions: "\
输入特征:
1. T (温度): 温度，单位为°C。
2. FM (失效模式): 破坏模式。
   - 1: FRP沙层脱粘
   - 2: FRP钢筋拔出
   - 3: 混凝土剪切破坏
   - 4: FRP钢筋断裂
   - 5: 混凝土劈裂
3. FT (FRP类型): FRP类型。
   - 1: GFRP
   - 2: CFRP
   - 3: BFRP
4. BS (FRP钢筋表面): FRP钢筋表面形式。
   - 1: 砂涂层
   - 2: 纤维包裹砂涂层
   - 3: 肋纹
   - 4: 纤维包裹
   - 5: 砂涂层肋纹
5. d (FRP钢筋直径): FRP钢筋直径，单位为mm。
6. la (锚固长度): 锚固长度，单位为mm。
7. fc (混凝土抗压强度): 混凝土抗压强度，单位为MPa。
8. c/d (混凝土覆盖/钢筋直径): 归一化混凝土保护层厚度。

输出特征:
- 界面粘结强度 (τu): 界面粘结强度，单位为MPa。

批量预测使用说明:
- 请确保Excel文件至少包含8列，对应以下输入特征，顺序如下：
  T, FM, FT, BS, d, la, fc, c/d
- 文件不应包含表头行。
- 离散特征（FM, FT, BS）请按照上述编码方式进行数字编码。
- 所有特征列必须包含有效的数值。
",
};
