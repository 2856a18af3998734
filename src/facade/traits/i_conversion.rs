use crate::models::conversion::RunOutcome;
use crate::utils::error::ConvertResult;

// Facade 接口，負責協調整批轉換流程
pub trait BatchConverterTrait: Send + Sync {
    /// 選擇資料夾、列出候選檔案並逐一轉換
    /// # 回傳
    /// - 未選擇資料夾、找不到檔案或轉換完成三種結果；轉換失敗（遇錯即停時）回傳錯誤
    fn run(&self) -> ConvertResult<RunOutcome>;
}
